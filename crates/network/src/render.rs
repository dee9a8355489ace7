use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::graph::CooccurrenceGraph;
use crate::layout::SpringLayout;

const MARGIN: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub show_names: bool,
    pub node_size: u32,
    pub font_size: u32,
    pub edge_width: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_names: false,
            node_size: 1,
            font_size: 10,
            edge_width: 0.5,
            width: 700,
            height: 500,
        }
    }
}

/// Draw the graph as an SVG document. `scores` (one per node, e.g. PageRank)
/// set node colour and size, from blue and small to red and large.
pub fn render_svg(
    graph: &CooccurrenceGraph,
    scores: &[f64],
    config: &RenderConfig,
) -> Result<String> {
    if scores.len() != graph.node_count() {
        return Err(NetworkError::ScoreMismatch {
            nodes: graph.node_count(),
            scores: scores.len(),
        });
    }

    let positions = SpringLayout::default().positions(graph);
    let names = graph.names();
    let (min_score, max_score) = scores
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));

    let to_pixel = |(x, y): (f64, f64)| -> (i32, i32) {
        let w = config.width as f64 - 2.0 * MARGIN;
        let h = config.height as f64 - 2.0 * MARGIN;
        ((MARGIN + x * w).round() as i32, (MARGIN + y * h).round() as i32)
    };
    let relative = |score: f64| {
        if max_score - min_score > f64::EPSILON {
            (score - min_score) / (max_score - min_score)
        } else {
            0.5
        }
    };

    // Sub-pixel widths become translucent 1px strokes.
    let stroke_width = config.edge_width.ceil().max(1.0) as u32;
    let edge_alpha = (0.6 * config.edge_width.min(1.0)).max(0.1);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        for (a, b, _) in graph.weighted_edges() {
            root.draw(&PathElement::new(
                vec![to_pixel(positions[a]), to_pixel(positions[b])],
                BLACK.mix(edge_alpha).stroke_width(stroke_width),
            ))
            .map_err(render_error)?;
        }

        for (idx, &(x, y)) in positions.iter().enumerate() {
            let t = relative(scores[idx]);
            let radius = (config.node_size.max(1) as f64 * (1.0 + 2.0 * t)).round() as u32;
            let center = to_pixel((x, y));

            root.draw(&Circle::new(
                center,
                radius,
                HSLColor(0.66 * (1.0 - t), 0.8, 0.5).filled(),
            ))
            .map_err(render_error)?;

            if config.show_names {
                let style = ("sans-serif", config.font_size as f64)
                    .into_font()
                    .color(&BLACK);
                root.draw(&Text::new(
                    names[idx].to_string(),
                    (center.0 + radius as i32 + 2, center.1),
                    style,
                ))
                .map_err(render_error)?;
            }
        }

        root.present().map_err(render_error)?;
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        bytes = svg.len(),
        "Rendered SVG"
    );

    Ok(svg)
}

fn render_error<E: std::fmt::Display>(err: E) -> NetworkError {
    NetworkError::Render(err.to_string())
}
