//! # Fact Facade
//!
//! The fluent entry point: declare a subject, state what it has, then ask.
//!
//! ```
//! use fact_core::{Fact, Value};
//!
//! let mut fact = Fact::in_memory();
//! fact.subject("cat").has("name", "meow")?;
//! fact.subject("meow").has("color", "black")?;
//!
//! let names = fact.what("cat", Some("name"))?;
//! assert_eq!(names, vec![Value::text("meow")]);
//! assert_eq!(fact.what(names, Some("color"))?, vec![Value::text("black")]);
//! # Ok::<(), fact_core::FactError>(())
//! ```

use crate::primitives::RESULT_SEPARATOR;
use crate::query::{QueryEngine, QueryTarget};
use crate::resolver::Resolver;
use crate::store::TripleStore;
use crate::{FactError, Triple, Value};
use std::path::Path;

/// A fact base: a triple store, its dynamic facts, and the builder state.
#[derive(Debug)]
pub struct Fact {
    store: TripleStore,
    resolver: Resolver,
    /// Subject declared by `subject`, waiting for `has`.
    pending: Option<String>,
}

impl Fact {
    /// Open a fact base at `path` with the built-in dynamic facts.
    ///
    /// An empty path keeps everything in memory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FactError> {
        Ok(Self::with_parts(TripleStore::open(path)?, Resolver::with_builtins()))
    }

    /// A volatile fact base with the built-in dynamic facts.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_parts(TripleStore::in_memory(), Resolver::with_builtins())
    }

    /// Assemble a fact base from an already opened store and a resolver.
    #[must_use]
    pub fn with_parts(store: TripleStore, resolver: Resolver) -> Self {
        Self {
            store,
            resolver,
            pending: None,
        }
    }

    /// Register (or replace) a dynamic fact.
    pub fn register<F>(&mut self, name: impl Into<String>, producer: F)
    where
        F: Fn() -> Vec<Value> + Send + Sync + 'static,
    {
        self.resolver.register(name, producer);
    }

    /// Declare the subject of the next `has`. Replaces any pending subject.
    pub fn subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.pending = Some(subject.into());
        self
    }

    /// Complete the pending statement and store it.
    ///
    /// The builder is idle afterwards, even if the write fails.
    pub fn has(
        &mut self,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<Triple, FactError> {
        let subject = self
            .pending
            .take()
            .ok_or(FactError::Precondition("has() called without a subject"))?;
        let triple = Triple::new(subject, predicate, object);
        self.store.add_edge(&triple)?;
        Ok(triple)
    }

    /// Ask a question.
    ///
    /// - With a predicate: the objects the target has via that predicate.
    ///   A batch target is queried element by element.
    /// - Without: the target names a dynamic fact, which is computed.
    pub fn what(
        &self,
        target: impl Into<QueryTarget>,
        predicate: Option<&str>,
    ) -> Result<Vec<Value>, FactError> {
        let target = target.into();
        match predicate {
            Some(predicate) => QueryEngine::new(&self.store).forward(&target, predicate),
            None => match &target {
                QueryTarget::Single(Value::Text(name)) => Ok(self.resolver.resolve(name)),
                QueryTarget::Single(other) => Err(FactError::TypeMismatch {
                    expected: "text",
                    found: other.kind(),
                }),
                QueryTarget::Batch(_) => Err(FactError::TypeMismatch {
                    expected: "single name",
                    found: "batch",
                }),
            },
        }
    }

    /// Who has `object` via `predicate`.
    pub fn who_has(&self, predicate: &str, object: &str) -> Result<Vec<Value>, FactError> {
        QueryEngine::new(&self.store).backward(predicate, object)
    }

    /// Join text values with `", "`.
    pub fn stringify(values: &[Value]) -> Result<String, FactError> {
        let parts = values
            .iter()
            .map(|value| {
                value.as_text().ok_or(FactError::TypeMismatch {
                    expected: "text",
                    found: value.kind(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(RESULT_SEPARATOR))
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &TripleStore {
        &self.store
    }

    /// Mutable access to the underlying store (bulk import).
    pub fn store_mut(&mut self) -> &mut TripleStore {
        &mut self.store
    }

    /// Close the store. Dynamic facts keep working; stored facts do not.
    pub fn close(&mut self) -> Result<(), FactError> {
        self.pending = None;
        self.store.close()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::NOW;
    use chrono::Utc;

    #[test]
    fn has_without_subject_is_precondition_error() {
        let mut fact = Fact::in_memory();
        assert!(matches!(
            fact.has("name", "meow"),
            Err(FactError::Precondition(_))
        ));
    }

    #[test]
    fn has_consumes_the_subject() {
        let mut fact = Fact::in_memory();
        let triple = fact.subject("cat").has("name", "meow").expect("has");
        assert_eq!(triple, Triple::new("cat", "name", "meow"));

        // Idle again: a second has() needs a new subject.
        assert!(matches!(
            fact.has("name", "purr"),
            Err(FactError::Precondition(_))
        ));
    }

    #[test]
    fn subject_overwrites_pending() {
        let mut fact = Fact::in_memory();
        fact.subject("cat");
        fact.subject("dog").has("name", "woof").expect("has");

        assert_eq!(
            fact.who_has("name", "woof").expect("who_has"),
            vec![Value::text("dog")]
        );
        assert!(fact.what("cat", Some("name")).expect("what").is_empty());
    }

    #[test]
    fn has_after_close_returns_to_idle() {
        let mut fact = Fact::in_memory();
        fact.close().expect("close");
        assert!(matches!(
            fact.subject("cat").has("name", "meow"),
            Err(FactError::StoreClosed)
        ));
        assert!(matches!(
            fact.has("name", "meow"),
            Err(FactError::Precondition(_))
        ));
    }

    #[test]
    fn what_without_predicate_is_dynamic() {
        let fact = Fact::in_memory();
        let values = fact.what(NOW, None).expect("what");
        assert_eq!(values.len(), 1);
        assert!(values[0].as_timestamp().is_some());

        assert!(fact.what("unregistered-name", None).expect("what").is_empty());
    }

    #[test]
    fn dynamic_facts_survive_close() {
        let mut fact = Fact::in_memory();
        fact.close().expect("close");
        assert_eq!(fact.what(NOW, None).expect("what").len(), 1);
        assert!(matches!(
            fact.what("cat", Some("name")),
            Err(FactError::StoreClosed)
        ));
    }

    #[test]
    fn registered_fact_is_resolved() {
        let mut fact = Fact::in_memory();
        fact.register("weekday", || vec![Value::text("Monday")]);
        assert_eq!(
            fact.what("weekday", None).expect("what"),
            vec![Value::text("Monday")]
        );
    }

    #[test]
    fn dynamic_lookup_rejects_other_shapes() {
        let fact = Fact::in_memory();
        assert!(matches!(
            fact.what(vec!["now", "now"], None),
            Err(FactError::TypeMismatch { found: "batch", .. })
        ));
        assert!(matches!(
            fact.what(Value::from(Utc::now()), None),
            Err(FactError::TypeMismatch {
                found: "timestamp",
                ..
            })
        ));
    }

    #[test]
    fn stringify_joins_text() {
        let values = vec![Value::text("meow"), Value::text("purr")];
        assert_eq!(Fact::stringify(&values).expect("stringify"), "meow, purr");
        assert_eq!(Fact::stringify(&[]).expect("stringify"), "");
    }

    #[test]
    fn stringify_rejects_timestamps() {
        let values = vec![Value::text("meow"), Value::from(Utc::now())];
        assert!(matches!(
            Fact::stringify(&values),
            Err(FactError::TypeMismatch { .. })
        ));
    }
}
