use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Category label attached to a tagged span.
///
/// The names follow the OntoNotes tag set used by most English NER models.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Other(String),
}

impl EntityLabel {
    /// People, organizations and geopolitical entities.
    pub fn defaults() -> Vec<EntityLabel> {
        vec![EntityLabel::Person, EntityLabel::Org, EntityLabel::Gpe]
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Other(label) => label,
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PERSON" => EntityLabel::Person,
            "ORG" => EntityLabel::Org,
            "GPE" => EntityLabel::Gpe,
            other => EntityLabel::Other(other.to_string()),
        }
    }
}

impl From<String> for EntityLabel {
    fn from(label: String) -> Self {
        EntityLabel::from(label.as_str())
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        label.as_str().to_string()
    }
}

impl FromStr for EntityLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("entity label cannot be empty".to_string());
        }
        Ok(EntityLabel::from(s))
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sentence span; `start`/`end` are byte offsets into the segmented text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A labelled entity span; offsets are relative to the tagged text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    pub label: EntityLabel,
    pub text: String,
    pub start: usize,
    pub end: usize,
}
