use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::CooccurrenceGraph;

/// Fruchterman-Reingold force-directed placement.
///
/// Positions are returned in node order and scaled into the unit square.
/// The same seed always gives the same picture.
#[derive(Debug, Clone)]
pub struct SpringLayout {
    pub iterations: usize,
    pub seed: u64,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self {
            iterations: 50,
            seed: 42,
        }
    }
}

impl SpringLayout {
    pub fn positions(&self, graph: &CooccurrenceGraph) -> Vec<(f64, f64)> {
        let n = graph.node_count();
        match n {
            0 => return Vec::new(),
            1 => return vec![(0.5, 0.5)],
            _ => {}
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pos: Vec<(f64, f64)> = (0..n).map(|_| (rng.r#gen(), rng.r#gen())).collect();
        let edges = graph.weighted_edges();

        let k = (1.0 / n as f64).sqrt();
        let mut temperature = 0.1;
        let cooling = temperature / (self.iterations as f64 + 1.0);

        for _ in 0..self.iterations {
            let mut disp = vec![(0.0f64, 0.0f64); n];

            for i in 0..n {
                for j in (i + 1)..n {
                    let (dx, dy) = (pos[i].0 - pos[j].0, pos[i].1 - pos[j].1);
                    let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                    let force = k * k / dist;
                    let (fx, fy) = (dx / dist * force, dy / dist * force);
                    disp[i].0 += fx;
                    disp[i].1 += fy;
                    disp[j].0 -= fx;
                    disp[j].1 -= fy;
                }
            }

            for &(a, b, weight) in &edges {
                if a == b {
                    continue;
                }
                let (dx, dy) = (pos[a].0 - pos[b].0, pos[a].1 - pos[b].1);
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = dist * dist / k * weight;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[a].0 -= fx;
                disp[a].1 -= fy;
                disp[b].0 += fx;
                disp[b].1 += fy;
            }

            for (p, d) in pos.iter_mut().zip(&disp) {
                let length = (d.0 * d.0 + d.1 * d.1).sqrt();
                if length > 0.0 {
                    let step = length.min(temperature);
                    p.0 += d.0 / length * step;
                    p.1 += d.1 / length * step;
                }
            }

            temperature -= cooling;
        }

        normalize(pos)
    }
}

fn normalize(pos: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let (min_x, max_x) = bounds(pos.iter().map(|p| p.0));
    let (min_y, max_y) = bounds(pos.iter().map(|p| p.1));

    let scale = |v: f64, min: f64, max: f64| {
        if max - min > f64::EPSILON {
            (v - min) / (max - min)
        } else {
            0.5
        }
    };

    pos.into_iter()
        .map(|(x, y)| (scale(x, min_x, max_x), scale(y, min_y, max_y)))
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{Edge, EdgeList};

    fn triangle() -> CooccurrenceGraph {
        CooccurrenceGraph::from_edges(&EdgeList::new(vec![
            Edge::new("A", "B"),
            Edge::new("B", "C"),
            Edge::new("C", "A"),
            Edge::new("C", "D"),
        ]))
    }

    #[test]
    fn test_positions_in_unit_square() {
        let positions = SpringLayout::default().positions(&triangle());

        assert_eq!(positions.len(), 4);
        for (x, y) in positions {
            assert!((0.0..=1.0).contains(&x));
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let layout = SpringLayout::default();
        assert_eq!(layout.positions(&triangle()), layout.positions(&triangle()));
    }

    #[test]
    fn test_trivial_graphs() {
        let layout = SpringLayout::default();
        assert!(layout.positions(&CooccurrenceGraph::new()).is_empty());

        let mut single = CooccurrenceGraph::new();
        single.add_entity("Holmes");
        assert_eq!(layout.positions(&single), vec![(0.5, 0.5)]);
    }
}
