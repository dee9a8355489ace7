use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::debug;

use crate::edges::EdgeList;

/// Undirected entity graph; edge weight is how many rows joined the pair.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceGraph {
    graph: UnGraph<String, f64>,
    entity_to_idx: HashMap<String, NodeIndex>,
}

impl CooccurrenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: &EdgeList) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(&edge.source, &edge.target);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            rows = edges.len(),
            "Built co-occurrence graph"
        );

        graph
    }

    pub fn add_entity(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.entity_to_idx.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(name.to_string());
        self.entity_to_idx.insert(name.to_string(), idx);
        idx
    }

    /// Add one co-occurrence; repeats increase the weight.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let a = self.add_entity(source);
        let b = self.add_entity(target);

        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge] += 1.0,
            None => {
                self.graph.add_edge(a, b, 1.0);
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Entity names in node order (first appearance in the edge list).
    pub fn names(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let a = *self.entity_to_idx.get(a)?;
        let b = *self.entity_to_idx.get(b)?;
        self.graph.find_edge(a, b).map(|edge| self.graph[edge])
    }

    /// `(a, b, weight)` triples with node positions as returned by [`names`](Self::names).
    pub fn weighted_edges(&self) -> Vec<(usize, usize, f64)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
            .collect()
    }

    /// Neighbour lists with weights, one per node.
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adj_list = vec![Vec::new(); self.node_count()];
        for (a, b, weight) in self.weighted_edges() {
            adj_list[a].push((b, weight));
            if a != b {
                adj_list[b].push((a, weight));
            }
        }
        adj_list
    }
}
