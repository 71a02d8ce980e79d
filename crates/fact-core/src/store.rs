//! # Triple Store
//!
//! Owns the backend handle for the lifetime of a session.
//!
//! ## Storage Backends
//!
//! - `InMemory`: `MemoryGraph` (fast, volatile, lost on close)
//! - `Persistent`: `RedbGraph` (disk-backed ACID storage)
//!
//! An empty path selects the in-memory backend.

use crate::normalize::RawValue;
use crate::storage::{EdgeStore, MemoryGraph, RedbGraph, ScanPlan};
use crate::{FactError, Triple};
use std::path::Path;

/// Storage backend for a `TripleStore`.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory graph (fast, volatile).
    InMemory(MemoryGraph),
    /// Disk-backed graph using redb (ACID, persistent).
    Persistent(RedbGraph),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryGraph::new())
    }
}

impl EdgeStore for StorageBackend {
    fn add_edge(&mut self, triple: &Triple) -> Result<bool, FactError> {
        match self {
            Self::InMemory(g) => g.add_edge(triple),
            Self::Persistent(r) => r.add_edge(triple),
        }
    }

    fn scan(&self, plan: &ScanPlan, visit: &mut dyn FnMut(RawValue)) -> Result<(), FactError> {
        match self {
            Self::InMemory(g) => g.scan(plan, visit),
            Self::Persistent(r) => r.scan(plan, visit),
        }
    }

    fn triples(&self) -> Result<Vec<Triple>, FactError> {
        match self {
            Self::InMemory(g) => g.triples(),
            Self::Persistent(r) => r.triples(),
        }
    }

    fn edge_count(&self) -> Result<usize, FactError> {
        match self {
            Self::InMemory(g) => g.edge_count(),
            Self::Persistent(r) => r.edge_count(),
        }
    }
}

/// The triple store: a backend plus its open/closed state.
///
/// Once `close` has run, every operation fails with `FactError::StoreClosed`.
#[derive(Debug)]
pub struct TripleStore {
    /// `None` once closed.
    backend: Option<StorageBackend>,
}

impl TripleStore {
    /// Open a store.
    ///
    /// An empty `path` opens a volatile in-memory store; anything else opens
    /// (or creates) a redb database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FactError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            Ok(Self::in_memory())
        } else {
            Self::with_redb(path)
        }
    }

    /// Open a volatile in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        tracing::debug!("opened in-memory triple store");
        Self {
            backend: Some(StorageBackend::default()),
        }
    }

    /// Open (or create) a persistent redb store at `path`.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, FactError> {
        let redb = RedbGraph::open(path)?;
        Ok(Self {
            backend: Some(StorageBackend::Persistent(redb)),
        })
    }

    /// Persist an edge. Returns `false` if it was already present.
    pub fn add_edge(&mut self, triple: &Triple) -> Result<bool, FactError> {
        let inserted = self
            .backend
            .as_mut()
            .ok_or(FactError::StoreClosed)?
            .add_edge(triple)?;
        if inserted {
            tracing::debug!(%triple, "added edge");
        } else {
            tracing::trace!(%triple, "duplicate edge ignored");
        }
        Ok(inserted)
    }

    /// Add every triple, returning how many were new.
    pub fn import(&mut self, triples: &[Triple]) -> Result<usize, FactError> {
        let mut added = 0;
        for triple in triples {
            if self.add_edge(triple)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Every stored edge in SPO order.
    pub fn triples(&self) -> Result<Vec<Triple>, FactError> {
        self.backend()?.triples()
    }

    /// Number of distinct stored edges.
    pub fn edge_count(&self) -> Result<usize, FactError> {
        self.backend()?.edge_count()
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, Some(StorageBackend::Persistent(_)))
    }

    /// Check whether `close` has already run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    /// Database file path, for persistent stores.
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        match &self.backend {
            Some(StorageBackend::Persistent(r)) => Some(r.path()),
            _ => None,
        }
    }

    /// Release the backend. A second call fails with `StoreClosed`.
    pub fn close(&mut self) -> Result<(), FactError> {
        let backend = self.backend.take().ok_or(FactError::StoreClosed)?;
        tracing::debug!(persistent = matches!(backend, StorageBackend::Persistent(_)), "closing triple store");
        drop(backend);
        Ok(())
    }

    /// Borrow the open backend.
    pub(crate) fn backend(&self) -> Result<&StorageBackend, FactError> {
        self.backend.as_ref().ok_or(FactError::StoreClosed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
