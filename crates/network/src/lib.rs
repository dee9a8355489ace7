pub mod edges;
pub mod error;
pub mod graph;
pub mod layout;
pub mod pagerank;
pub mod render;

pub use edges::{COLUMNS, Edge, EdgeList, build_edges};
pub use error::{NetworkError, Result};
pub use graph::CooccurrenceGraph;
pub use layout::SpringLayout;
pub use pagerank::{NodeScore, PageRank, rank_names};
pub use render::{RenderConfig, render_svg};

use extract::EntitySet;
use tracing::info;

/// Everything derived from one run's entity sets.
#[derive(Debug, Clone)]
pub struct Network {
    pub edges: EdgeList,
    pub graph: CooccurrenceGraph,
    pub scores: Vec<f64>,
}

impl Network {
    /// Edge rows, graph and PageRank scores for the given entity sets.
    pub fn build(entity_sets: &[EntitySet], pagerank: &PageRank) -> Self {
        let edges = build_edges(entity_sets);
        let graph = CooccurrenceGraph::from_edges(&edges);
        let scores = pagerank.rank(&graph);

        info!(
            entity_sets = entity_sets.len(),
            rows = edges.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built entity network"
        );

        Self {
            edges,
            graph,
            scores,
        }
    }

    /// Names with scores, best first.
    pub fn ranking(&self) -> Vec<NodeScore> {
        rank_names(&self.graph, &self.scores)
    }

    pub fn render(&self, config: &RenderConfig) -> Result<String> {
        render_svg(&self.graph, &self.scores, config)
    }
}
