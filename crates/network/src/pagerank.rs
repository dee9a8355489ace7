use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::CooccurrenceGraph;

/// Weighted PageRank over the co-occurrence graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRank {
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeScore {
    pub name: String,
    pub score: f64,
}

impl PageRank {
    /// Scores indexed like [`CooccurrenceGraph::names`]; they sum to 1.
    pub fn rank(&self, graph: &CooccurrenceGraph) -> Vec<f64> {
        let n = graph.node_count();
        if n == 0 {
            return Vec::new();
        }

        let adj_list = graph.adjacency();
        let strength: Vec<f64> = adj_list
            .iter()
            .map(|neighbors| neighbors.iter().map(|(_, w)| w).sum())
            .collect();

        let n_f = n as f64;
        let mut scores = vec![1.0 / n_f; n];
        let mut iteration = 0;

        while iteration < self.max_iterations {
            iteration += 1;

            // Mass sitting on isolated nodes is spread evenly.
            let dangling: f64 = (0..n)
                .filter(|&node| strength[node] == 0.0)
                .map(|node| scores[node])
                .sum();
            let base = (1.0 - self.damping) / n_f + self.damping * dangling / n_f;

            let mut next = vec![base; n];
            for (node, neighbors) in adj_list.iter().enumerate() {
                if strength[node] == 0.0 {
                    continue;
                }
                let share = self.damping * scores[node] / strength[node];
                for &(neighbor, weight) in neighbors {
                    next[neighbor] += share * weight;
                }
            }

            let delta: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
            scores = next;

            if delta < self.tolerance {
                break;
            }
        }

        debug!(nodes = n, iterations = iteration, "PageRank converged");
        scores
    }

    /// Names paired with scores, best first.
    pub fn ranked(&self, graph: &CooccurrenceGraph) -> Vec<NodeScore> {
        rank_names(graph, &self.rank(graph))
    }
}

/// Pair node names with their scores and sort best first. Ties keep node order.
pub fn rank_names(graph: &CooccurrenceGraph, scores: &[f64]) -> Vec<NodeScore> {
    let mut ranked: Vec<NodeScore> = graph
        .names()
        .into_iter()
        .zip(scores)
        .map(|(name, &score)| NodeScore {
            name: name.to_string(),
            score,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
