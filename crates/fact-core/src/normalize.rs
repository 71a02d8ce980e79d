//! # Value Normalizer
//!
//! Converts what a backend scan yields into the `Value`s callers see.
//!
//! Identifiers are stored in their lexical IRI form (`<cat>`). Normalization
//! strips exactly one leading `<` and one trailing `>`, which restores every
//! identifier exactly, including ones that themselves contain angle brackets.

use crate::Value;
use crate::primitives::{IRI_CLOSE, IRI_OPEN};

/// A scan result before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A string in the backend's stored lexical form.
    Lexical(String),
    /// A value already in caller-facing form; passed through verbatim.
    Native(Value),
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        Self::Native(value)
    }
}

/// Encode an identifier into its stored lexical form.
#[must_use]
pub fn encode_identifier(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 2);
    out.push(IRI_OPEN);
    out.push_str(id);
    out.push(IRI_CLOSE);
    out
}

/// Strip one pair of IRI delimiters, if present.
#[must_use]
pub fn strip_delimiters(s: &str) -> &str {
    s.strip_prefix(IRI_OPEN)
        .and_then(|rest| rest.strip_suffix(IRI_CLOSE))
        .unwrap_or(s)
}

/// Normalize a raw scan result.
///
/// Lexical strings wrapped in `<...>` lose exactly one delimiter pair;
/// unwrapped strings and native values are returned unchanged.
#[must_use]
pub fn normalize(raw: RawValue) -> Value {
    match raw {
        RawValue::Lexical(s) => {
            let stripped = strip_delimiters(&s).to_owned();
            if stripped.len() == s.len() {
                Value::Text(s)
            } else {
                Value::Text(stripped)
            }
        }
        RawValue::Native(value) => value,
    }
}

// =============================================================================
// TESTS
// =============================================================================
