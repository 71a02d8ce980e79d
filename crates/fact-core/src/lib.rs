//! # fact-core
//!
//! A minimal persistent fact store - THE LOGIC.
//!
//! Facts are subject–predicate–object triples. They can be asked about in
//! two directions:
//! - forward: what does `cat` have via `name`?
//! - backward: who has `meow` via `name`?
//!
//! Some facts are not stored but computed when asked for (`now`); those are
//! served by the `Resolver`.
//!
//! ## Layers
//!
//! ```text
//! Fact (builder + dispatcher)
//!  ├── QueryEngine ── normalize ──┐
//!  ├── Resolver                   │
//!  └── TripleStore ── EdgeStore ──┘
//!                      ├── MemoryGraph
//!                      └── RedbGraph
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies
//! - Every failure is a returned `FactError`; nothing terminates the process
//! - No hidden global state: each `Fact` owns its store and resolver

// =============================================================================
// MODULES
// =============================================================================

pub mod fact;
pub mod formats;
pub mod normalize;
pub mod primitives;
pub mod query;
pub mod resolver;
pub mod storage;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use types::{FactError, Triple, Value};

pub use fact::Fact;
pub use formats::{SnapshotHeader, export_snapshot, import_snapshot};
pub use normalize::{RawValue, normalize};
pub use query::{Direction, Path, QueryEngine, QueryTarget};
pub use resolver::{Producer, Resolver};
pub use storage::{EdgeStore, Index, MemoryGraph, RedbGraph, ScanPlan};
pub use store::{StorageBackend, TripleStore};
