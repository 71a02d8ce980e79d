//! In-memory triple backend.
//!
//! Uses `BTreeSet` exclusively so scan order is the same lexicographic order
//! the redb backend produces.

use super::{EdgeStore, Index, ScanPlan};
use crate::normalize::{RawValue, encode_identifier, strip_delimiters};
use crate::{FactError, Triple};
use std::collections::BTreeSet;

type Key = (String, String, String);

/// A volatile triple store. Contents are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    spo: BTreeSet<Key>,
    pos: BTreeSet<Key>,
}

impl MemoryGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EdgeStore for MemoryGraph {
    fn add_edge(&mut self, triple: &Triple) -> Result<bool, FactError> {
        let s = encode_identifier(&triple.subject);
        let p = encode_identifier(&triple.predicate);
        let o = encode_identifier(&triple.object);

        if !self.spo.insert((s.clone(), p.clone(), o.clone())) {
            return Ok(false);
        }
        self.pos.insert((p, o, s));
        Ok(true)
    }

    fn scan(&self, plan: &ScanPlan, visit: &mut dyn FnMut(RawValue)) -> Result<(), FactError> {
        let index = match plan.index {
            Index::Spo => &self.spo,
            Index::Pos => &self.pos,
        };
        let lower = (plan.first.clone(), plan.second.clone(), String::new());
        for (first, second, third) in index.range(lower..) {
            if *first != plan.first || *second != plan.second {
                break;
            }
            visit(RawValue::Lexical(third.clone()));
        }
        Ok(())
    }

    fn triples(&self) -> Result<Vec<Triple>, FactError> {
        Ok(self
            .spo
            .iter()
            .map(|(s, p, o)| {
                Triple::new(strip_delimiters(s), strip_delimiters(p), strip_delimiters(o))
            })
            .collect())
    }

    fn edge_count(&self) -> Result<usize, FactError> {
        Ok(self.spo.len())
    }
}
