//! # Query Module
//!
//! Forward and backward traversal over stored edges.
//!
//! A query is built as a `Path`, lowered into a backend `ScanPlan`
//! (`Path::optimize`), executed, and every raw result is normalized before
//! it is appended to the output.

use crate::normalize::{RawValue, encode_identifier, normalize};
use crate::storage::{EdgeStore, Index, ScanPlan};
use crate::store::TripleStore;
use crate::{FactError, Value};

// =============================================================================
// QUERY TARGET
// =============================================================================

/// The subject argument of a forward query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// Evaluate once.
    Single(Value),
    /// Evaluate once per element; results are concatenated in input order.
    Batch(Vec<Value>),
}

impl QueryTarget {
    /// The identifiers to query, in order.
    ///
    /// Fails with `TypeMismatch` if any element is not text.
    pub fn identifiers(&self) -> Result<Vec<&str>, FactError> {
        match self {
            Self::Single(value) => Ok(vec![identifier(value)?]),
            Self::Batch(values) => values.iter().map(identifier).collect(),
        }
    }
}

fn identifier(value: &Value) -> Result<&str, FactError> {
    value.as_text().ok_or(FactError::TypeMismatch {
        expected: "text",
        found: value.kind(),
    })
}

impl From<&str> for QueryTarget {
    fn from(s: &str) -> Self {
        Self::Single(Value::from(s))
    }
}

impl From<String> for QueryTarget {
    fn from(s: String) -> Self {
        Self::Single(Value::from(s))
    }
}

impl From<Value> for QueryTarget {
    fn from(value: Value) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<Value>> for QueryTarget {
    fn from(values: Vec<Value>) -> Self {
        Self::Batch(values)
    }
}

impl From<Vec<&str>> for QueryTarget {
    fn from(values: Vec<&str>) -> Self {
        Self::Batch(values.into_iter().map(Value::from).collect())
    }
}

impl From<&[&str]> for QueryTarget {
    fn from(values: &[&str]) -> Self {
        Self::Batch(values.iter().copied().map(Value::from).collect())
    }
}

// =============================================================================
// PATH
// =============================================================================

/// Direction of a single-hop traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From a subject along a predicate to its objects.
    Out,
    /// From an object back along a predicate to its subjects.
    In,
}

/// A single-hop traversal from a fixed node along one predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    start: String,
    predicate: String,
    direction: Direction,
}

impl Path {
    /// Objects of `subject` via `predicate`.
    #[must_use]
    pub fn outgoing(subject: &str, predicate: &str) -> Self {
        Self {
            start: subject.to_owned(),
            predicate: predicate.to_owned(),
            direction: Direction::Out,
        }
    }

    /// Subjects pointing at `object` via `predicate`.
    #[must_use]
    pub fn incoming(object: &str, predicate: &str) -> Self {
        Self {
            start: object.to_owned(),
            predicate: predicate.to_owned(),
            direction: Direction::In,
        }
    }

    /// The traversal direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Lower the path into a prefix scan over the matching index.
    #[must_use]
    pub fn optimize(&self) -> ScanPlan {
        let start = encode_identifier(&self.start);
        let predicate = encode_identifier(&self.predicate);
        match self.direction {
            Direction::Out => ScanPlan {
                index: Index::Spo,
                first: start,
                second: predicate,
            },
            Direction::In => ScanPlan {
                index: Index::Pos,
                first: predicate,
                second: start,
            },
        }
    }
}

// =============================================================================
// QUERY ENGINE
// =============================================================================

/// Executes paths against an edge store.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'s> {
    /// `None` when built over a closed store.
    edges: Option<&'s dyn EdgeStore>,
}

impl<'s> QueryEngine<'s> {
    /// Create an engine over `store`.
    ///
    /// A closed store is accepted here; queries then fail with `StoreClosed`.
    #[must_use]
    pub fn new(store: &'s TripleStore) -> Self {
        match store.backend() {
            Ok(backend) => Self::over(backend),
            Err(_) => Self { edges: None },
        }
    }

    /// Create an engine directly over a backend.
    pub(crate) const fn over(edges: &'s dyn EdgeStore) -> Self {
        Self { edges: Some(edges) }
    }

    /// All objects reachable from the target via one `predicate` edge.
    ///
    /// A batch stops at the first element whose scan fails; no partial
    /// result is returned.
    pub fn forward(&self, target: &QueryTarget, predicate: &str) -> Result<Vec<Value>, FactError> {
        let mut out = Vec::new();
        for subject in target.identifiers()? {
            out.extend(self.run(&Path::outgoing(subject, predicate))?);
        }
        Ok(out)
    }

    /// All subjects with a `predicate` edge pointing at `object`.
    pub fn backward(&self, predicate: &str, object: &str) -> Result<Vec<Value>, FactError> {
        self.run(&Path::incoming(object, predicate))
    }

    /// Execute one path, normalizing every result.
    pub fn run(&self, path: &Path) -> Result<Vec<Value>, FactError> {
        let plan = path.optimize();
        let edges = self.edges.ok_or(FactError::StoreClosed)?;

        let mut out = Vec::new();
        edges.scan(&plan, &mut |raw: RawValue| out.push(normalize(raw)))?;

        tracing::trace!(
            direction = ?path.direction(),
            results = out.len(),
            "query finished"
        );
        Ok(out)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Triple;
    use chrono::Utc;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts its own drops.
    struct CursorGuard(Rc<Cell<usize>>);

    impl Drop for CursorGuard {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    /// A backend whose scan yields one value, then fails when its first key
    /// component is `fail_on`.
    #[derive(Debug)]
    struct BrokenCursor {
        fail_on: String,
        scans: Cell<usize>,
        released: Rc<Cell<usize>>,
    }

    impl BrokenCursor {
        fn failing_at(identifier: &str) -> Self {
            Self {
                fail_on: encode_identifier(identifier),
                scans: Cell::new(0),
                released: Rc::new(Cell::new(0)),
            }
        }
    }

    impl EdgeStore for BrokenCursor {
        fn add_edge(&mut self, _triple: &Triple) -> Result<bool, FactError> {
            Ok(false)
        }

        fn scan(&self, plan: &ScanPlan, visit: &mut dyn FnMut(RawValue)) -> Result<(), FactError> {
            let _cursor = CursorGuard(Rc::clone(&self.released));
            self.scans.set(self.scans.get() + 1);
            visit(RawValue::Lexical("<partial>".to_string()));
            if plan.first == self.fail_on {
                return Err(FactError::QueryExecution("cursor read failed".to_string()));
            }
            Ok(())
        }

        fn triples(&self) -> Result<Vec<Triple>, FactError> {
            Ok(Vec::new())
        }

        fn edge_count(&self) -> Result<usize, FactError> {
            Ok(0)
        }
    }

    fn scenario() -> TripleStore {
        let mut store = TripleStore::in_memory();
        store.add_edge(&Triple::new("cat", "name", "meow")).expect("add");
        store.add_edge(&Triple::new("dog", "name", "woof")).expect("add");
        store.add_edge(&Triple::new("meow", "color", "black")).expect("add");
        store
    }

    #[test]
    fn optimize_picks_index() {
        let out = Path::outgoing("cat", "name").optimize();
        assert_eq!(out.index, Index::Spo);
        assert_eq!(out.first, "<cat>");
        assert_eq!(out.second, "<name>");

        let back = Path::incoming("meow", "name").optimize();
        assert_eq!(back.index, Index::Pos);
        assert_eq!(back.first, "<name>");
        assert_eq!(back.second, "<meow>");
    }

    #[test]
    fn forward_and_backward() {
        let store = scenario();
        let engine = QueryEngine::new(&store);

        assert_eq!(
            engine.forward(&"cat".into(), "name").expect("forward"),
            vec![Value::text("meow")]
        );
        assert_eq!(
            engine.backward("name", "woof").expect("backward"),
            vec![Value::text("dog")]
        );
    }

    #[test]
    fn no_match_is_empty() {
        let store = scenario();
        let engine = QueryEngine::new(&store);

        assert!(engine.forward(&"cat".into(), "color").expect("forward").is_empty());
        assert!(engine.backward("name", "quack").expect("backward").is_empty());
    }

    #[test]
    fn batch_keeps_input_order() {
        let store = scenario();
        let engine = QueryEngine::new(&store);

        let target = QueryTarget::from(vec!["dog", "cat"]);
        assert_eq!(
            engine.forward(&target, "name").expect("forward"),
            vec![Value::text("woof"), Value::text("meow")]
        );
    }

    #[test]
    fn timestamp_target_rejected() {
        let store = scenario();
        let engine = QueryEngine::new(&store);

        let target = QueryTarget::from(vec![Value::text("cat"), Value::from(Utc::now())]);
        assert!(matches!(
            engine.forward(&target, "name"),
            Err(FactError::TypeMismatch {
                expected: "text",
                found: "timestamp"
            })
        ));
    }

    #[test]
    fn closed_store_rejected() {
        let mut store = scenario();
        store.close().expect("close");
        let engine = QueryEngine::new(&store);
        assert!(matches!(
            engine.backward("name", "meow"),
            Err(FactError::StoreClosed)
        ));
    }

    #[test]
    fn failed_scan_surfaces_query_execution() {
        let forward_edges = BrokenCursor::failing_at("cat");
        let result = QueryEngine::over(&forward_edges).forward(&"cat".into(), "name");
        assert!(matches!(result, Err(FactError::QueryExecution(_))));
        assert_eq!(forward_edges.scans.get(), 1);
        assert_eq!(forward_edges.released.get(), 1);

        let backward_edges = BrokenCursor::failing_at("name");
        let result = QueryEngine::over(&backward_edges).backward("name", "meow");
        assert!(matches!(result, Err(FactError::QueryExecution(_))));
        assert_eq!(backward_edges.scans.get(), 1);
        assert_eq!(backward_edges.released.get(), 1);
    }

    #[test]
    fn failed_batch_element_stops_the_batch() {
        let edges = BrokenCursor::failing_at("cat");
        let target = QueryTarget::from(vec!["dog", "cat", "cow"]);

        let result = QueryEngine::over(&edges).forward(&target, "name");
        assert!(matches!(result, Err(FactError::QueryExecution(_))));
        // "cow" is never scanned, and both opened cursors were released.
        assert_eq!(edges.scans.get(), 2);
        assert_eq!(edges.released.get(), 2);
    }

    #[test]
    fn successful_scan_releases_cursor() {
        let edges = BrokenCursor::failing_at("nobody");
        let values = QueryEngine::over(&edges)
            .forward(&QueryTarget::from(vec!["dog", "cat"]), "name")
            .expect("forward");
        assert_eq!(values, vec![Value::text("partial"), Value::text("partial")]);
        assert_eq!(edges.released.get(), 2);
    }
}
