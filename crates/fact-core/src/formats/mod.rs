//! # Formats Module
//!
//! Serialization formats for fact stores.

pub mod snapshot;

pub use snapshot::{
    SnapshotHeader, export_snapshot, import_snapshot, triples_from_bytes, triples_to_bytes,
};
