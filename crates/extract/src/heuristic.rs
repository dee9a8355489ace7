//! Built-in NER backed by `anno`'s heuristic tagger.
//!
//! No model weights: `anno::HeuristicNER` works from capitalisation, person
//! prefixes and small lexicons. Sentence boundaries come from UAX #29 with a
//! fix-up for honorific abbreviations ("Mr. Holmes").

use anno::{EntityType, HeuristicNER, Model};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::ModelError;
use crate::model::LanguageModel;
use crate::schema::{EntityLabel, Sentence, TaggedSpan};

// Abbreviations that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "st.", "prof.", "capt.", "col.", "gen.", "lt.", "rev.", "hon.",
    "messrs.", "mme.", "mlle.", "sgt.",
];

/// Built-in [`LanguageModel`]: `anno` heuristic tagging, UAX #29 sentences.
#[derive(Debug, Clone, Default)]
pub struct HeuristicModel {
    ner: HeuristicNER,
}

impl HeuristicModel {
    pub fn load() -> Result<Self, ModelError> {
        let ner = HeuristicNER::new();
        if !ner.is_available() {
            return Err(ModelError::Load(format!("{} backend unavailable", ner.name())));
        }
        Ok(Self { ner })
    }
}

impl LanguageModel for HeuristicModel {
    fn segment_sentences(&self, text: &str) -> Result<Vec<Sentence>, ModelError> {
        let mut sentences = Vec::new();
        // Start of a sentence held open because it ended on an abbreviation.
        let mut pending: Option<usize> = None;

        for (offset, piece) in text.split_sentence_bound_indices() {
            let start = offset + (piece.len() - piece.trim_start().len());
            let end = offset + piece.trim_end().len();
            if end <= start {
                continue;
            }

            let start = pending.take().unwrap_or(start);
            if ends_with_abbreviation(&text[start..end]) {
                pending = Some(start);
                continue;
            }

            sentences.push(Sentence {
                text: text[start..end].to_string(),
                start,
                end,
            });
        }

        if let Some(start) = pending {
            let end = text.trim_end().len();
            sentences.push(Sentence {
                text: text[start..end].to_string(),
                start,
                end,
            });
        }

        Ok(sentences)
    }

    fn tag_entities(&self, text: &str) -> Result<Vec<TaggedSpan>, ModelError> {
        let entities = self
            .ner
            .extract_entities(text, None)
            .map_err(|e| ModelError::Tagging(e.to_string()))?;

        let spans = entities
            .iter()
            .map(|entity| {
                // anno reports character offsets
                let (start, end) = anno::chars_to_bytes(text, entity.start(), entity.end());
                TaggedSpan {
                    label: label_for(&entity.entity_type),
                    text: text[start..end].to_string(),
                    start,
                    end,
                }
            })
            .collect();

        Ok(spans)
    }

    fn name(&self) -> &str {
        self.ner.name()
    }
}

fn label_for(entity_type: &EntityType) -> EntityLabel {
    match entity_type {
        EntityType::Person => EntityLabel::Person,
        EntityType::Organization => EntityLabel::Org,
        EntityType::Location => EntityLabel::Gpe,
        other => EntityLabel::Other(other.as_label().to_string()),
    }
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    let Some(last) = sentence.split_whitespace().last() else {
        return false;
    };
    let last = last.to_lowercase();

    if ABBREVIATIONS.contains(&last.as_str()) {
        return true;
    }

    // Initials: "J." in "J. Smith"
    let mut chars = last.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_alphabetic()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, String)> {
        HeuristicModel::load()
            .unwrap()
            .tag_entities(text)
            .unwrap()
            .into_iter()
            .map(|s| (s.label.to_string(), s.text))
            .collect()
    }

    fn pair(label: &str, text: &str) -> (String, String) {
        (label.to_string(), text.to_string())
    }

    #[test]
    fn test_segments_sentences_with_offsets() {
        let text = "Mr. Holmes lives in London. Watson visits him.";
        let sentences = HeuristicModel::default().segment_sentences(text).unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Mr. Holmes lives in London.");
        assert_eq!(sentences[1].text, "Watson visits him.");
        for s in &sentences {
            assert_eq!(&text[s.start..s.end], s.text);
        }
    }

    #[test]
    fn test_blank_text_has_no_sentences() {
        let model = HeuristicModel::default();
        assert!(model.segment_sentences("   ").unwrap().is_empty());
        assert!(model.segment_sentences("").unwrap().is_empty());
    }

    #[test]
    fn test_tags_people_and_places() {
        assert_eq!(
            tags("Sherlock Holmes met Dr. Watson in London."),
            vec![
                pair("PERSON", "Sherlock Holmes"),
                pair("PERSON", "Dr. Watson"),
                pair("GPE", "London"),
            ]
        );
    }

    #[test]
    fn test_offsets_are_bytes_for_non_ascii_text() {
        let text = "Café owner Holmes met Watson.";
        let spans = HeuristicModel::default().tag_entities(text).unwrap();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Holmes");
        assert_eq!((spans[0].start, spans[0].end), (12, 18));
        for span in &spans {
            assert_eq!(&text[span.start..span.end], span.text);
        }
    }

    #[test]
    fn test_organisation_with_connector_keeps_possessive() {
        assert_eq!(
            tags("The Bank of England's clerk smiled."),
            vec![pair("ORG", "Bank of England's")]
        );
    }

    #[test]
    fn test_skips_sentence_starters() {
        assert!(tags("Suddenly the door opened.").is_empty());
        assert_eq!(tags("Yesterday Holmes arrived."), vec![pair("PERSON", "Holmes")]);
        assert_eq!(tags("On Monday Holmes left."), vec![pair("PERSON", "Holmes")]);
    }

    #[test]
    fn test_location_preposition() {
        assert_eq!(
            tags("Inspector Lestrade and Holmes went from Paris to Berlin."),
            vec![
                pair("PERSON", "Inspector Lestrade"),
                pair("PERSON", "Holmes"),
                pair("GPE", "Paris"),
                pair("GPE", "Berlin"),
            ]
        );
    }

    #[test]
    fn test_unmapped_types_keep_anno_label() {
        assert_eq!(label_for(&EntityType::Date), EntityLabel::Other("DATE".to_string()));
        assert_eq!(label_for(&EntityType::Location), EntityLabel::Gpe);
    }
}
