//! # Dynamic Fact Resolver
//!
//! Facts that are computed when asked for instead of read from storage.
//!
//! A `Resolver` maps reserved names to zero-argument producers. It is an
//! owned value: each `Fact` carries its own, so several stores in one
//! process never share a table.

use crate::Value;
use crate::primitives::NOW;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fmt;

/// A zero-argument producer of computed values.
pub type Producer = Box<dyn Fn() -> Vec<Value> + Send + Sync>;

/// Registry of dynamic facts.
///
/// Registration happens during setup; lookups never mutate the table.
pub struct Resolver {
    entries: BTreeMap<String, Producer>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Resolver {
    /// Create a resolver with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Create a resolver with the built-in entries (`now`).
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut resolver = Self::empty();
        resolver.register(NOW, || vec![Value::Timestamp(Utc::now())]);
        resolver
    }

    /// Add or replace the producer for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, producer: F)
    where
        F: Fn() -> Vec<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.entries.insert(name.clone(), Box::new(producer)).is_some() {
            tracing::debug!(name = %name, "replaced dynamic fact");
        }
    }

    /// Compute the values for `name`.
    ///
    /// Unregistered names yield an empty sequence.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Vec<Value> {
        self.entries
            .get(name)
            .map(|producer| producer())
            .unwrap_or_default()
    }

    /// Check whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// =============================================================================
// TESTS
// =============================================================================
