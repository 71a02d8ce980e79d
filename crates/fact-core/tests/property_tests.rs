//! # Property-Based Tests
//!
//! Invariants of insertion, traversal and normalization, checked with
//! proptest. The traversal properties run against both backends; the
//! redb cases share a temp directory per case and run fewer iterations.

use fact_core::normalize::encode_identifier;
use fact_core::{Fact, MemoryGraph, QueryTarget, RawValue, Value, normalize};
use fact_core::{EdgeStore, Triple};
use proptest::collection::vec;
use proptest::prelude::*;
use tempfile::TempDir;

/// Identifiers including brackets, spaces and non-ASCII text.
fn identifier() -> impl Strategy<Value = String> {
    "[a-z<> แมว]{0,8}"
}

fn triple() -> impl Strategy<Value = (String, String, String)> {
    (identifier(), identifier(), identifier())
}

/// A fresh in-memory fact base and a fresh redb one.
fn both_backends() -> (Vec<Fact>, TempDir) {
    let temp = tempfile::tempdir().expect("temp dir");
    let persistent = Fact::open(temp.path().join("facts.redb")).expect("open redb");
    (vec![Fact::in_memory(), persistent], temp)
}

proptest! {
    /// Inserting the same edge twice gives the same forward result as once.
    #[test]
    fn idempotent_insert((s, p, o) in triple()) {
        let mut once = Fact::in_memory();
        once.subject(s.as_str()).has(p.as_str(), o.as_str()).expect("has");

        let mut twice = Fact::in_memory();
        twice.subject(s.as_str()).has(p.as_str(), o.as_str()).expect("has");
        twice.subject(s.as_str()).has(p.as_str(), o.as_str()).expect("has");

        prop_assert_eq!(
            once.what(s.as_str(), Some(p.as_str())).expect("what"),
            twice.what(s.as_str(), Some(p.as_str())).expect("what")
        );
    }

    /// Distinct objects for one subject+predicate all come back.
    #[test]
    fn multi_valued(s in identifier(), p in identifier(), o1 in identifier(), o2 in identifier()) {
        prop_assume!(o1 != o2);
        let mut fact = Fact::in_memory();
        fact.subject(s.as_str()).has(p.as_str(), o1.as_str()).expect("has");
        fact.subject(s.as_str()).has(p.as_str(), o2.as_str()).expect("has");

        let objects = fact.what(s.as_str(), Some(p.as_str())).expect("what");
        prop_assert_eq!(objects.len(), 2);
        prop_assert!(objects.contains(&Value::text(o1.as_str())));
        prop_assert!(objects.contains(&Value::text(o2.as_str())));
    }

    /// normalize(normalize(x)) == normalize(x).
    #[test]
    fn normalize_idempotent(s in "\\PC{0,12}") {
        let once = normalize(RawValue::Lexical(s));
        let twice = normalize(RawValue::from(once.clone()));
        prop_assert_eq!(once, twice);
    }

    /// The stored lexical form always normalizes back to the identifier.
    #[test]
    fn encoding_round_trips(id in "\\PC{0,12}") {
        prop_assert_eq!(
            normalize(RawValue::Lexical(encode_identifier(&id))),
            Value::text(id.as_str())
        );
    }

    /// Edge count equals the number of distinct triples inserted.
    #[test]
    fn edge_count_reflects_unique_triples(triples in vec(triple(), 0..30)) {
        let mut graph = MemoryGraph::new();
        for (s, p, o) in &triples {
            graph.add_edge(&Triple::new(s.as_str(), p.as_str(), o.as_str())).expect("add");
        }
        let unique = triples.iter().collect::<std::collections::BTreeSet<_>>().len();
        prop_assert_eq!(graph.edge_count().expect("count"), unique);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After inserting (s, p, o), forward finds o and backward finds s.
    #[test]
    fn round_trip((s, p, o) in triple()) {
        let (facts, _temp) = both_backends();
        for mut fact in facts {
            fact.subject(s.as_str()).has(p.as_str(), o.as_str()).expect("has");

            let objects = fact.what(s.as_str(), Some(p.as_str())).expect("what");
            prop_assert!(objects.contains(&Value::text(o.as_str())));

            let subjects = fact.who_has(&p, &o).expect("who_has");
            prop_assert!(subjects.contains(&Value::text(s.as_str())));
        }
    }

    /// Forward([s1, s2], p) == Forward(s1, p) ++ Forward(s2, p).
    #[test]
    fn batch_is_concatenation(
        triples in vec(triple(), 0..20),
        s1 in identifier(),
        s2 in identifier(),
        p in identifier()
    ) {
        let (facts, _temp) = both_backends();
        for mut fact in facts {
            for (s, pred, o) in &triples {
                fact.subject(s.as_str()).has(pred.as_str(), o.as_str()).expect("has");
            }
            fact.subject(s1.as_str()).has(p.as_str(), "x").expect("has");

            let mut expected = fact.what(s1.as_str(), Some(p.as_str())).expect("what");
            expected.extend(fact.what(s2.as_str(), Some(p.as_str())).expect("what"));

            let batch = QueryTarget::from(vec![s1.as_str(), s2.as_str()]);
            prop_assert_eq!(fact.what(batch, Some(p.as_str())).expect("what"), expected);
        }
    }

    /// Both backends answer every query identically, including identifiers
    /// that are prefixes of each other or contain brackets.
    #[test]
    fn backends_agree(
        triples in vec(("[ab<>]{0,3}", "[ab<>]{0,3}", "[ab<>]{0,3}"), 0..24),
        query in ("[ab<>]{0,3}", "[ab<>]{0,3}")
    ) {
        let (mut facts, _temp) = both_backends();
        for fact in &mut facts {
            for (s, p, o) in &triples {
                fact.subject(s.as_str()).has(p.as_str(), o.as_str()).expect("has");
            }
        }
        let (id, p) = query;
        let memory = &facts[0];
        let redb = &facts[1];

        prop_assert_eq!(
            memory.what(id.as_str(), Some(p.as_str())).expect("what"),
            redb.what(id.as_str(), Some(p.as_str())).expect("what")
        );
        prop_assert_eq!(
            memory.who_has(&p, &id).expect("who_has"),
            redb.who_has(&p, &id).expect("who_has")
        );
        prop_assert_eq!(
            memory.store().triples().expect("triples"),
            redb.store().triples().expect("triples")
        );
    }
}
