//! # Core Type Definitions
//!
//! This module contains the core types of the fact store:
//! - Statements (`Triple`)
//! - Caller-facing scalars (`Value`)
//! - Error types (`FactError`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// TRIPLE
// =============================================================================

/// A subject–predicate–object statement.
///
/// Identifiers are opaque IRI-like strings. A Triple is never mutated after
/// construction; declaring another fact builds another Triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// The thing the statement is about.
    pub subject: String,
    /// The relation.
    pub predicate: String,
    /// The thing the subject is related to.
    pub object: String,
}

impl Triple {
    /// Create a new triple.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {} --> {}", self.subject, self.predicate, self.object)
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// A scalar handed back to callers by queries and dynamic facts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// A textual value, usually an identifier.
    Text(String),
    /// A point in time, produced by computed facts such as `now`.
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Create a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Borrow the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Timestamp(_) => None,
        }
    }

    /// Get the timestamp, if this is a timestamp value.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(t) => Some(*t),
            Self::Text(_) => None,
        }
    }

    /// Short name of the variant, used in type mismatch errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the fact store.
///
/// - No silent failures
/// - The CORE never terminates the process; every failure is returned
/// - Absence of a match is not an error (queries return an empty `Vec`)
#[derive(Debug, Error)]
pub enum FactError {
    /// The storage backend could not be created or opened.
    #[error("Storage initialization failed: {0}")]
    StorageInit(String),

    /// A write transaction against the backend failed.
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// A traversal failed while iterating results.
    #[error("Query execution failed: {0}")]
    QueryExecution(String),

    /// A caller passed a value of an unsupported shape.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// An operation was called in the wrong state.
    #[error("Precondition violated: {0}")]
    Precondition(&'static str),

    /// The store has already been closed.
    #[error("Store is closed")]
    StoreClosed,

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
