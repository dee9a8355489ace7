use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

/// Counts and stage timings for one pipeline run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PipelineStats {
    pub document_bytes: usize,
    pub cleaned_bytes: usize,
    pub entity_sets: usize,
    pub edge_rows: usize,
    pub nodes: usize,
    pub graph_edges: usize,

    pub load_ms: f64,
    pub clean_ms: f64,
    pub extract_ms: f64,
    pub network_ms: f64,
    pub render_ms: f64,
}

impl PipelineStats {
    pub fn record_load(&mut self, duration: Duration, bytes: usize) {
        self.load_ms = as_ms(duration);
        self.document_bytes = bytes;
    }

    pub fn record_clean(&mut self, duration: Duration, bytes: usize) {
        self.clean_ms = as_ms(duration);
        self.cleaned_bytes = bytes;
    }

    pub fn record_extract(&mut self, duration: Duration, entity_sets: usize) {
        self.extract_ms = as_ms(duration);
        self.entity_sets = entity_sets;
    }

    pub fn record_network(&mut self, duration: Duration, rows: usize, nodes: usize, edges: usize) {
        self.network_ms = as_ms(duration);
        self.edge_rows = rows;
        self.nodes = nodes;
        self.graph_edges = edges;
    }

    pub fn record_render(&mut self, duration: Duration) {
        self.render_ms = as_ms(duration);
    }

    pub fn log(&self) {
        info!(
            document_bytes = self.document_bytes,
            cleaned_bytes = self.cleaned_bytes,
            entity_sets = self.entity_sets,
            edge_rows = self.edge_rows,
            nodes = self.nodes,
            load_ms = self.load_ms,
            extract_ms = self.extract_ms,
            "Pipeline finished"
        );
    }
}

fn as_ms(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
