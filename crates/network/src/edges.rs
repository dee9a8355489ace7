use serde::{Deserialize, Serialize};
use std::io::Write;

use extract::EntitySet;

use crate::error::Result;

pub const COLUMNS: [&str; 2] = ["source", "target"];

/// One row of the co-occurrence relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Two-column `source -> target` table, in the order rows were produced.
/// Repeated pairs are kept; the graph turns them into weights.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeList {
    rows: Vec<Edge>,
}

impl EdgeList {
    pub fn new(rows: Vec<Edge>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> [&'static str; 2] {
        COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Edge] {
        &self.rows
    }

    /// Write as CSV. The header row is written even when there are no edges.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(COLUMNS)?;
        for edge in &self.rows {
            csv.write_record([edge.source.as_str(), edge.target.as_str()])?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// The first entity of each set is the source; every other entity in the
/// set becomes a target. A set of `n` entities yields `n - 1` rows.
pub fn build_edges(entity_sets: &[EntitySet]) -> EdgeList {
    let rows = entity_sets
        .iter()
        .filter_map(|set| set.first().map(|source| (source, set.rest())))
        .flat_map(|(source, targets)| targets.iter().map(move |target| Edge::new(source, target)))
        .collect();

    EdgeList::new(rows)
}
