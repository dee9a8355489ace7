use serde::Serialize;
use tracing::{debug, info};

use crate::entity_set::EntitySet;

#[derive(Debug, Clone, Serialize)]
pub struct PairComparison {
    pub index: usize,
    pub left: EntitySet,
    pub right: EntitySet,
    pub matches: bool,
}

/// Side-by-side check of two extraction runs over the same text.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub left_len: usize,
    pub right_len: usize,
    pub pairs: Vec<PairComparison>,
}

impl Comparison {
    pub fn same_length(&self) -> bool {
        self.left_len == self.right_len
    }

    pub fn overall_match(&self) -> bool {
        self.same_length() && self.pairs.iter().all(|p| p.matches)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &PairComparison> {
        self.pairs.iter().filter(|p| !p.matches)
    }
}

/// Compare two sequences of entity sets index by index.
///
/// Sets match only when they hold the same entities in the same order, since
/// the order decides which entity becomes an edge source. Pairs are compared
/// up to the shorter length; a length difference fails the overall match.
pub fn compare_entity_sets(left: &[EntitySet], right: &[EntitySet]) -> Comparison {
    let pairs: Vec<PairComparison> = left
        .iter()
        .zip(right.iter())
        .enumerate()
        .map(|(index, (l, r))| {
            let matches = l == r;
            debug!(index, left = ?l, right = ?r, matches, "Compared entity sets");
            PairComparison {
                index,
                left: l.clone(),
                right: r.clone(),
                matches,
            }
        })
        .collect();

    let comparison = Comparison {
        left_len: left.len(),
        right_len: right.len(),
        pairs,
    };

    info!(
        left = comparison.left_len,
        right = comparison.right_len,
        mismatches = comparison.mismatches().count(),
        overall_match = comparison.overall_match(),
        "Entity set comparison finished"
    );

    comparison
}
