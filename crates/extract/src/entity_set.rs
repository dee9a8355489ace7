use serde::{Deserialize, Serialize};

/// Unique entity names found in one sentence, kept in first-seen order.
///
/// The first entity is the edge source when the set becomes network rows, so
/// ordering is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitySet {
    entities: Vec<String>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity; returns `false` if it was already present.
    pub fn insert(&mut self, entity: String) -> bool {
        if self.entities.contains(&entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    pub fn first(&self) -> Option<&str> {
        self.entities.first().map(String::as_str)
    }

    /// Everything after the first entity.
    pub fn rest(&self) -> &[String] {
        self.entities.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Carries relational information (two or more members).
    pub fn is_relational(&self) -> bool {
        self.entities.len() > 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entities.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entities
    }
}

impl FromIterator<String> for EntitySet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = EntitySet::new();
        for entity in iter {
            set.insert(entity);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for EntitySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a EntitySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let set: EntitySet = ["Watson", "Holmes", "Watson", "Lestrade"].into_iter().collect();

        assert_eq!(set.as_slice(), ["Watson", "Holmes", "Lestrade"]);
        assert_eq!(set.first(), Some("Watson"));
        assert_eq!(set.rest(), ["Holmes", "Lestrade"]);
    }

    #[test]
    fn test_empty_set() {
        let set = EntitySet::new();
        assert_eq!(set.first(), None);
        assert!(set.rest().is_empty());
        assert!(!set.is_relational());
    }

    #[test]
    fn test_serializes_as_list() {
        let set: EntitySet = ["Alice", "Bob"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["Alice","Bob"]"#);
    }
}
