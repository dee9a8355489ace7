use crate::error::ModelError;
use crate::schema::{Sentence, TaggedSpan};

/// NLP capability the extractor is built on.
///
/// Load an implementation once and share it by reference for a whole run.
pub trait LanguageModel {
    /// Split text into sentences, in document order.
    fn segment_sentences(&self, text: &str) -> Result<Vec<Sentence>, ModelError>;

    /// Tag named entities in text, in document order.
    fn tag_entities(&self, text: &str) -> Result<Vec<TaggedSpan>, ModelError>;

    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<M: LanguageModel + ?Sized> LanguageModel for &M {
    fn segment_sentences(&self, text: &str) -> Result<Vec<Sentence>, ModelError> {
        (**self).segment_sentences(text)
    }

    fn tag_entities(&self, text: &str) -> Result<Vec<TaggedSpan>, ModelError> {
        (**self).tag_entities(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<M: LanguageModel + ?Sized> LanguageModel for Box<M> {
    fn segment_sentences(&self, text: &str) -> Result<Vec<Sentence>, ModelError> {
        (**self).segment_sentences(text)
    }

    fn tag_entities(&self, text: &str) -> Result<Vec<TaggedSpan>, ModelError> {
        (**self).tag_entities(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
