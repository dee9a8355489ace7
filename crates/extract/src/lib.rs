pub mod compare;
pub mod entity_set;
pub mod error;
pub mod heuristic;
pub mod model;
pub mod normalizer;
pub mod schema;

pub use compare::{Comparison, PairComparison, compare_entity_sets};
pub use entity_set::EntitySet;
pub use error::{ExtractError, ModelError, Result};
pub use heuristic::HeuristicModel;
pub use model::LanguageModel;
pub use normalizer::{POSSESSIVE, clean_entity, truncate_at};
pub use schema::{EntityLabel, Sentence, TaggedSpan};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

/// Which text the tagger sees for each sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggingScope {
    /// Re-tag every sentence on its own text.
    #[default]
    Sentence,
    /// Tag the whole text once and assign spans to the sentence containing them.
    Document,
}

impl FromStr for TaggingScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sentence" => Ok(TaggingScope::Sentence),
            "document" => Ok(TaggingScope::Document),
            other => Err(format!("unknown tagging scope: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub labels: Vec<EntityLabel>,
    pub scope: TaggingScope,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            labels: EntityLabel::defaults(),
            scope: TaggingScope::Sentence,
        }
    }
}

/// Turns cleaned text into one [`EntitySet`] per sentence that mentions at
/// least two distinct allowed entities.
pub struct EntityExtractor<'m, M: LanguageModel + ?Sized> {
    model: &'m M,
    config: ExtractorConfig,
}

impl<'m, M: LanguageModel + ?Sized> EntityExtractor<'m, M> {
    pub fn new(model: &'m M, config: ExtractorConfig) -> Self {
        Self { model, config }
    }

    pub fn with_defaults(model: &'m M) -> Self {
        Self::new(model, ExtractorConfig::default())
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn extract(&self, text: &str) -> Result<Vec<EntitySet>> {
        let sentences = self
            .model
            .segment_sentences(text)
            .map_err(ExtractError::Segmentation)?;

        debug!(
            model = self.model.name(),
            sentences = sentences.len(),
            scope = ?self.config.scope,
            "Segmented text"
        );

        let per_sentence = match self.config.scope {
            TaggingScope::Sentence => self.tag_each_sentence(&sentences)?,
            TaggingScope::Document => self.tag_document(text, &sentences)?,
        };

        let entity_sets: Vec<EntitySet> = per_sentence
            .into_iter()
            .filter(EntitySet::is_relational)
            .collect();

        info!(
            sentences = sentences.len(),
            entity_sets = entity_sets.len(),
            "Extracted entity sets"
        );

        Ok(entity_sets)
    }

    fn tag_each_sentence(&self, sentences: &[Sentence]) -> Result<Vec<EntitySet>> {
        sentences
            .iter()
            .enumerate()
            .map(|(sentence_index, sentence)| {
                let spans = self.model.tag_entities(&sentence.text).map_err(|source| {
                    ExtractError::SentenceTagging {
                        sentence_index,
                        source,
                    }
                })?;
                Ok(self.entity_set(&spans))
            })
            .collect()
    }

    fn tag_document(&self, text: &str, sentences: &[Sentence]) -> Result<Vec<EntitySet>> {
        let spans = self
            .model
            .tag_entities(text)
            .map_err(ExtractError::DocumentTagging)?;

        Ok(sentences
            .iter()
            .map(|sentence| {
                let inside: Vec<TaggedSpan> = spans
                    .iter()
                    .filter(|s| s.start >= sentence.start && s.end <= sentence.end)
                    .cloned()
                    .collect();
                self.entity_set(&inside)
            })
            .collect())
    }

    fn entity_set(&self, spans: &[TaggedSpan]) -> EntitySet {
        spans
            .iter()
            .filter(|span| self.config.labels.contains(&span.label))
            .filter_map(|span| clean_entity(&span.text))
            .collect()
    }
}

/// Run the extractor once per scope over the same text and compare results.
pub fn compare_scopes<M: LanguageModel + ?Sized>(
    model: &M,
    labels: &[EntityLabel],
    text: &str,
) -> Result<Comparison> {
    let run = |scope| {
        let config = ExtractorConfig {
            labels: labels.to_vec(),
            scope,
        };
        EntityExtractor::new(model, config).extract(text)
    };

    let by_sentence = run(TaggingScope::Sentence)?;
    let by_document = run(TaggingScope::Document)?;

    Ok(compare_entity_sets(&by_sentence, &by_document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Sentences split on '|'; tags come from a lookup on the exact text.
    #[derive(Default)]
    struct ScriptedModel {
        tags: HashMap<String, Vec<(&'static str, &'static str)>>,
        fail_on: Option<String>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedModel {
        fn tag(mut self, sentence: &str, spans: Vec<(&'static str, &'static str)>) -> Self {
            self.tags.insert(sentence.to_string(), spans);
            self
        }
    }

    impl LanguageModel for ScriptedModel {
        fn segment_sentences(&self, text: &str) -> std::result::Result<Vec<Sentence>, ModelError> {
            let mut offset = 0;
            Ok(text
                .split('|')
                .map(|part| {
                    let sentence = Sentence {
                        text: part.to_string(),
                        start: offset,
                        end: offset + part.len(),
                    };
                    offset += part.len() + 1;
                    sentence
                })
                .collect())
        }

        fn tag_entities(&self, text: &str) -> std::result::Result<Vec<TaggedSpan>, ModelError> {
            self.calls.borrow_mut().push(text.to_string());
            if self.fail_on.as_deref() == Some(text) {
                return Err(ModelError::Tagging("boom".to_string()));
            }
            Ok(self
                .tags
                .get(text)
                .map(|spans| {
                    spans
                        .iter()
                        .map(|(label, surface)| TaggedSpan {
                            label: EntityLabel::from(*label),
                            text: surface.to_string(),
                            start: 0,
                            end: surface.len(),
                        })
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    fn names(sets: &[EntitySet]) -> Vec<Vec<String>> {
        sets.iter().map(|s| s.as_slice().to_vec()).collect()
    }

    #[test]
    fn test_filters_cleans_and_dedups() {
        let model = ScriptedModel::default()
            .tag(
                "s1",
                vec![
                    ("PERSON", " Holmes's "),
                    ("DATE", "Monday"),
                    ("GPE", "London"),
                    ("PERSON", "Holmes"),
                    ("ORG", "'s"),
                ],
            )
            .tag("s2", vec![("GPE", "Paris")])
            .tag("s3", vec![("ORG", "Scotland Yard"), ("PERSON", "Lestrade")]);

        let sets = EntityExtractor::with_defaults(&model)
            .extract("s1|s2|s3")
            .unwrap();

        assert_eq!(
            names(&sets),
            vec![
                vec!["Holmes".to_string(), "London".to_string()],
                vec!["Scotland Yard".to_string(), "Lestrade".to_string()],
            ]
        );
    }

    #[test]
    fn test_retags_each_sentence_text() {
        let model = ScriptedModel::default();
        EntityExtractor::with_defaults(&model)
            .extract("a|b|c")
            .unwrap();

        assert_eq!(*model.calls.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_custom_labels() {
        let model = ScriptedModel::default()
            .tag("s1", vec![("PERSON", "Ann"), ("DATE", "May"), ("DATE", "June")]);
        let config = ExtractorConfig {
            labels: vec![EntityLabel::from("DATE")],
            ..Default::default()
        };

        let sets = EntityExtractor::new(&model, config).extract("s1").unwrap();
        assert_eq!(names(&sets), vec![vec!["May".to_string(), "June".to_string()]]);
    }

    #[test]
    fn test_no_qualifying_sentence_is_empty() {
        let model = ScriptedModel::default().tag("only", vec![("GPE", "Paris")]);
        let sets = EntityExtractor::with_defaults(&model).extract("only").unwrap();

        assert!(sets.is_empty());
    }

    #[test]
    fn test_tagging_failure_carries_sentence_index() {
        let model = ScriptedModel {
            fail_on: Some("bad".to_string()),
            ..Default::default()
        };

        let err = EntityExtractor::with_defaults(&model)
            .extract("ok|bad")
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::SentenceTagging { sentence_index: 1, .. }
        ));
    }

    #[test]
    fn test_scopes_agree_on_heuristic_model() {
        let text = "Sherlock Holmes met Dr. Watson in London. Suddenly the door opened. \
                    Inspector Lestrade and Holmes went from Paris to Berlin.";
        let model = HeuristicModel::load().unwrap();

        let comparison = compare_scopes(&model, &EntityLabel::defaults(), text).unwrap();
        assert!(comparison.overall_match());

        let sets = EntityExtractor::with_defaults(&model).extract(text).unwrap();
        assert_eq!(
            names(&sets),
            vec![
                vec!["Sherlock Holmes", "Dr. Watson", "London"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
                vec!["Inspector Lestrade", "Holmes", "Paris", "Berlin"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ]
        );
    }
}
