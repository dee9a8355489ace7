//! Trims a downloaded book to its body and repairs encoding artifacts.
//!
//! Project Gutenberg texts fetched with the wrong charset come back with
//! UTF-8 punctuation decoded as Latin-1, so a right single quote turns into
//! the three characters `â\x80\x99`. The substitutions below undo the common
//! cases and flatten line breaks so sentence segmentation sees running prose.

use tracing::debug;

use crate::document::Document;
use crate::error::{IngestError, MarkerKind, Result};

pub const DEFAULT_END_MARKER: &str = "THE END";

const SPACE: &str = " ";
const MISDECODED_RIGHT_SINGLE_QUOTE: &str = "\u{e2}\u{80}\u{99}";
const MISDECODED_LEFT_DOUBLE_QUOTE: &str = "\u{e2}\u{80}\u{9c}";
const MISDECODED_RIGHT_DOUBLE_QUOTE: &str = "\u{e2}\u{80}\u{9d}";
const MISDECODED_EM_DASH: &str = "\u{e2}\u{80}\u{94}";

/// Applied in order; later rules see the output of earlier ones.
const REPLACEMENTS: [(&str, &str); 6] = [
    ("\r", SPACE),
    ("\n", SPACE),
    (MISDECODED_RIGHT_SINGLE_QUOTE, "'"),
    (MISDECODED_LEFT_DOUBLE_QUOTE, "\""),
    (MISDECODED_RIGHT_DOUBLE_QUOTE, "\""),
    (MISDECODED_EM_DASH, SPACE),
];

/// Slice `text` from the first `start_marker` up to (excluding) the last
/// `end_marker`, then normalize artifacts.
pub fn clean_text(text: &str, start_marker: &str, end_marker: &str) -> Result<String> {
    let index_start = text
        .find(start_marker)
        .ok_or_else(|| IngestError::MarkerNotFound {
            kind: MarkerKind::Start,
            marker: start_marker.to_string(),
        })?;
    let index_end = text
        .rfind(end_marker)
        .ok_or_else(|| IngestError::MarkerNotFound {
            kind: MarkerKind::End,
            marker: end_marker.to_string(),
        })?;

    // An end marker that only occurs before the start yields nothing.
    let body = if index_end > index_start {
        &text[index_start..index_end]
    } else {
        ""
    };

    debug!(
        start = index_start,
        end = index_end,
        bytes = body.len(),
        "Sliced document body"
    );

    Ok(normalize_artifacts(body))
}

/// Clean a whole [`Document`].
pub fn clean(document: &Document, start_marker: &str, end_marker: &str) -> Result<String> {
    clean_text(&document.text, start_marker, end_marker)
}

pub fn normalize_artifacts(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleans_example_book() {
        let raw = "Chapter 1\u{e2}\u{80}\u{99}s start\r\nThe End is near.THE END";
        let cleaned = clean_text(raw, "Chapter 1", DEFAULT_END_MARKER).unwrap();

        assert_eq!(cleaned, "Chapter 1's start  The End is near.");
    }

    #[test]
    fn test_missing_end_marker() {
        let err = clean_text("Chapter One. Hello world.", "Chapter One", "NOPE").unwrap_err();

        match err {
            IngestError::MarkerNotFound { kind, marker } => {
                assert_eq!(kind, MarkerKind::End);
                assert_eq!(marker, "NOPE");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_start_marker() {
        let err = clean_text("Hello world. THE END", "Chapter One", "THE END").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MarkerNotFound { kind: MarkerKind::Start, .. }
        ));
    }

    #[test]
    fn test_first_start_and_last_end() {
        let raw = "junk START one START two THE END mid THE END tail";
        let cleaned = clean_text(raw, "START", "THE END").unwrap();

        assert_eq!(cleaned, "START one START two THE END mid ");
    }

    #[test]
    fn test_end_before_start_is_empty() {
        let cleaned = clean_text("THE END then START", "START", "THE END").unwrap();
        assert_eq!(cleaned, "");
    }

    #[test]
    fn test_quote_and_dash_repair() {
        let raw = "\u{e2}\u{80}\u{9c}Hi,\u{e2}\u{80}\u{9d} said Ann\u{e2}\u{80}\u{94}quietly";
        assert_eq!(normalize_artifacts(raw), "\"Hi,\" said Ann quietly");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = "a\r\nb\u{e2}\u{80}\u{99}c \u{e2}\u{80}\u{9c}d\u{e2}\u{80}\u{9d}\u{e2}\u{80}\u{94}e";
        let once = normalize_artifacts(raw);
        assert_eq!(normalize_artifacts(&once), once);
    }

    #[test]
    fn test_clean_document() {
        let doc = Document::new("book.txt", "preface CHAPTER I\nIt began. THE END".to_string());
        let cleaned = clean(&doc, "CHAPTER I", DEFAULT_END_MARKER).unwrap();

        assert_eq!(cleaned, "CHAPTER I It began. ");
    }
}
