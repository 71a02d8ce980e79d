//! # Primitives
//!
//! Hardcoded constants for the fact CORE.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Opening delimiter of the stored lexical form of an identifier.
pub const IRI_OPEN: char = '<';

/// Closing delimiter of the stored lexical form of an identifier.
pub const IRI_CLOSE: char = '>';

/// Separator used by `Fact::stringify` when joining result values.
pub const RESULT_SEPARATOR: &str = ", ";

/// Reserved dynamic-fact name resolving to the current timestamp.
pub const NOW: &str = "now";

/// Magic bytes for the snapshot format header.
///
/// - File Header = Magic Bytes ("FACT") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"FACT";

/// Current snapshot format version.
///
/// Increment this when making breaking changes to the snapshot payload.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum accepted snapshot size (256 MB).
///
/// Checked before any payload decoding so a corrupt or hostile file cannot
/// drive allocation.
pub const MAX_SNAPSHOT_SIZE: usize = 256 * 1024 * 1024;
