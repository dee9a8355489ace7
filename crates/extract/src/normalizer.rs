/// Possessive suffix dropped from entity names ("Holmes's" -> "Holmes").
pub const POSSESSIVE: &str = "'s";

/// Cut `text` at the first occurrence of `marker`, or return it unchanged.
pub fn truncate_at<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.find(marker) {
        Some(index) => &text[..index],
        None => text,
    }
}

/// Normalize an entity's surface text: trim, then drop the first possessive
/// and everything after it. Returns `None` when nothing is left.
pub fn clean_entity(text: &str) -> Option<String> {
    let cleaned = truncate_at(text.trim(), POSSESSIVE);

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
