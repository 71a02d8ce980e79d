//! # redb-backed Triple Storage
//!
//! A disk-backed triple store using the redb embedded database, providing:
//! - ACID transactions (both indexes are written in one transaction)
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (each scan runs inside its own read transaction)
//!
//! Keys are tuples of stored lexical forms; values are `()`. Key uniqueness
//! is what deduplicates edges.

use super::{EdgeStore, Index, ScanPlan};
use crate::normalize::{RawValue, encode_identifier, strip_delimiters};
use crate::{FactError, Triple};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::{Path, PathBuf};

/// Forward index: (subject, predicate, object) -> ()
const SPO: TableDefinition<(&str, &str, &str), ()> = TableDefinition::new("spo");

/// Backward index: (predicate, object, subject) -> ()
const POS: TableDefinition<(&str, &str, &str), ()> = TableDefinition::new("pos");

/// A disk-backed triple store using redb.
pub struct RedbGraph {
    /// The redb database handle.
    db: Database,
    /// Where the database file lives.
    path: PathBuf,
}

impl std::fmt::Debug for RedbGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbGraph")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RedbGraph {
    /// Open or create a triple database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FactError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(|e| FactError::StorageInit(e.to_string()))?;

        // Initialize tables if they don't exist
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| FactError::StorageInit(e.to_string()))?;
            let _ = write_txn
                .open_table(SPO)
                .map_err(|e| FactError::StorageInit(e.to_string()))?;
            let _ = write_txn
                .open_table(POS)
                .map_err(|e| FactError::StorageInit(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| FactError::StorageInit(e.to_string()))?;
        }

        tracing::debug!(path = %path.display(), "opened redb triple store");

        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    /// The database file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// =============================================================================
// EDGESTORE TRAIT IMPLEMENTATION
// =============================================================================

impl EdgeStore for RedbGraph {
    fn add_edge(&mut self, triple: &Triple) -> Result<bool, FactError> {
        let s = encode_identifier(&triple.subject);
        let p = encode_identifier(&triple.predicate);
        let o = encode_identifier(&triple.object);

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| FactError::StorageWrite(e.to_string()))?;

        let inserted = {
            let mut spo_table = write_txn
                .open_table(SPO)
                .map_err(|e| FactError::StorageWrite(e.to_string()))?;
            let inserted = spo_table
                .insert((s.as_str(), p.as_str(), o.as_str()), ())
                .map_err(|e| FactError::StorageWrite(e.to_string()))?
                .is_none();

            if inserted {
                let mut pos_table = write_txn
                    .open_table(POS)
                    .map_err(|e| FactError::StorageWrite(e.to_string()))?;
                pos_table
                    .insert((p.as_str(), o.as_str(), s.as_str()), ())
                    .map_err(|e| FactError::StorageWrite(e.to_string()))?;
            }
            inserted
        };

        if inserted {
            write_txn
                .commit()
                .map_err(|e| FactError::StorageWrite(e.to_string()))?;
        } else {
            // Nothing changed; skip the durable commit.
            write_txn
                .abort()
                .map_err(|e| FactError::StorageWrite(e.to_string()))?;
        }
        Ok(inserted)
    }

    fn scan(&self, plan: &ScanPlan, visit: &mut dyn FnMut(RawValue)) -> Result<(), FactError> {
        let definition = match plan.index {
            Index::Spo => SPO,
            Index::Pos => POS,
        };

        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| FactError::QueryExecution(e.to_string()))?;
        let table = read_txn
            .open_table(definition)
            .map_err(|e| FactError::QueryExecution(e.to_string()))?;

        let lower = (plan.first.as_str(), plan.second.as_str(), "");
        for entry in table
            .range(lower..)
            .map_err(|e| FactError::QueryExecution(e.to_string()))?
        {
            let (key, _) = entry.map_err(|e| FactError::QueryExecution(e.to_string()))?;
            let (first, second, third) = key.value();
            if first != plan.first || second != plan.second {
                break;
            }
            visit(RawValue::Lexical(third.to_owned()));
        }
        Ok(())
    }

    fn triples(&self) -> Result<Vec<Triple>, FactError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| FactError::QueryExecution(e.to_string()))?;
        let table = read_txn
            .open_table(SPO)
            .map_err(|e| FactError::QueryExecution(e.to_string()))?;

        let mut triples = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| FactError::QueryExecution(e.to_string()))?
        {
            let (key, _) = entry.map_err(|e| FactError::QueryExecution(e.to_string()))?;
            let (s, p, o) = key.value();
            triples.push(Triple::new(
                strip_delimiters(s),
                strip_delimiters(p),
                strip_delimiters(o),
            ));
        }
        Ok(triples)
    }

    fn edge_count(&self) -> Result<usize, FactError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| FactError::QueryExecution(e.to_string()))?;
        let table = read_txn
            .open_table(SPO)
            .map_err(|e| FactError::QueryExecution(e.to_string()))?;
        let count = table
            .len()
            .map_err(|e| FactError::QueryExecution(e.to_string()))?;
        Ok(count as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
