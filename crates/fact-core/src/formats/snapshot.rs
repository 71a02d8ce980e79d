//! # Snapshot Format
//!
//! Binary export/import of every stored triple.
//!
//! Format: Header (5 bytes) + postcard-serialized `Vec<Triple>`.
//! - 4 bytes: Magic ("FACT")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is decoded.
//! File I/O lives in the app layer.

use crate::store::TripleStore;
use crate::{FactError, Triple, primitives};

const HEADER_LEN: usize = 5;

// =============================================================================
// FILE HEADER
// =============================================================================

/// The snapshot header precedes all triple data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl SnapshotHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), FactError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(FactError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(FactError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let [m0, m1, m2, m3] = self.magic;
        [m0, m1, m2, m3, self.version]
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FactError> {
        split_header(bytes).map(|(header, _)| header)
    }
}

/// Split a snapshot into its (unvalidated) header and payload.
fn split_header(bytes: &[u8]) -> Result<(SnapshotHeader, &[u8]), FactError> {
    let (&[m0, m1, m2, m3, version], payload) = bytes
        .split_first_chunk::<HEADER_LEN>()
        .ok_or_else(|| FactError::SerializationError("Header too short".to_string()))?;
    let header = SnapshotHeader {
        magic: [m0, m1, m2, m3],
        version,
    };
    Ok((header, payload))
}

impl Default for SnapshotHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize triples to bytes (header + payload).
pub fn triples_to_bytes(triples: &[Triple]) -> Result<Vec<u8>, FactError> {
    let payload =
        postcard::to_stdvec(triples).map_err(|e| FactError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + payload.len());
    result.extend_from_slice(&SnapshotHeader::new().to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Deserialize triples from bytes.
pub fn triples_from_bytes(bytes: &[u8]) -> Result<Vec<Triple>, FactError> {
    if bytes.len() > primitives::MAX_SNAPSHOT_SIZE {
        return Err(FactError::SerializationError(format!(
            "Snapshot size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            primitives::MAX_SNAPSHOT_SIZE
        )));
    }

    let (header, payload) = split_header(bytes)?;
    header.validate()?;

    postcard::from_bytes(payload).map_err(|e| {
        FactError::SerializationError(format!("Failed to deserialize snapshot: {}", e))
    })
}

/// Export every triple of `store`.
pub fn export_snapshot(store: &TripleStore) -> Result<Vec<u8>, FactError> {
    triples_to_bytes(&store.triples()?)
}

/// Import a snapshot into `store`, returning how many edges were new.
pub fn import_snapshot(store: &mut TripleStore, bytes: &[u8]) -> Result<usize, FactError> {
    let triples = triples_from_bytes(bytes)?;
    store.import(&triples)
}

// =============================================================================
// TESTS
// =============================================================================
