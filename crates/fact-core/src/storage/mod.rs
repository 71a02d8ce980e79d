//! # Storage Backends
//!
//! Every backend keeps two covering indexes over the stored lexical forms:
//! - SPO: (subject, predicate, object), answers forward queries
//! - POS: (predicate, object, subject), answers backward queries
//!
//! Both query directions therefore become a range scan over a two-component
//! key prefix, and the duplicate check is a key-uniqueness check.

mod memory;
mod redb_graph;

pub use memory::MemoryGraph;
pub use redb_graph::RedbGraph;

use crate::normalize::RawValue;
use crate::{FactError, Triple};

/// Which covering index a scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    /// Keyed by (subject, predicate, object).
    Spo,
    /// Keyed by (predicate, object, subject).
    Pos,
}

/// An optimized traversal: an index plus the two key components to bind.
///
/// Every key in `index` starting with `(first, second)` is a match and its
/// third component is the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    /// The index to scan.
    pub index: Index,
    /// First key component, in stored lexical form.
    pub first: String,
    /// Second key component, in stored lexical form.
    pub second: String,
}

/// The operations a triple backend provides.
///
/// All fallible operations return `Result<T, FactError>` so in-memory and
/// persistent backends can be used uniformly.
pub trait EdgeStore: std::fmt::Debug {
    /// Persist an edge. Returns `false` when the identical edge already exists.
    fn add_edge(&mut self, triple: &Triple) -> Result<bool, FactError>;

    /// Run a scan, handing each match to `visit` in index order.
    ///
    /// Any resource the scan acquires is released before this returns,
    /// whether it returns `Ok` or `Err`.
    fn scan(&self, plan: &ScanPlan, visit: &mut dyn FnMut(RawValue)) -> Result<(), FactError>;

    /// Every stored edge, in SPO order, with identifiers decoded.
    fn triples(&self) -> Result<Vec<Triple>, FactError>;

    /// Number of distinct stored edges.
    fn edge_count(&self) -> Result<usize, FactError>;
}
