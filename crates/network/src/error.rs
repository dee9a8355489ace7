use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to write edge table: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize network data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("got {scores} scores for a graph with {nodes} nodes")]
    ScoreMismatch { nodes: usize, scores: usize },

    #[error("failed to render graph: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
