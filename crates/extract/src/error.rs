use thiserror::Error;

/// Failure reported by a [`LanguageModel`](crate::LanguageModel).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model could not be loaded: {0}")]
    Load(String),

    #[error("sentence segmentation failed: {0}")]
    Segmentation(String),

    #[error("entity tagging failed: {0}")]
    Tagging(String),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not segment text into sentences")]
    Segmentation(#[source] ModelError),

    #[error("could not tag entities in sentence {sentence_index}")]
    SentenceTagging {
        sentence_index: usize,
        #[source]
        source: ModelError,
    },

    #[error("could not tag entities in document")]
    DocumentTagging(#[source] ModelError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
