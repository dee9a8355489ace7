pub mod cleaner;
pub mod document;
pub mod error;
pub mod fetch;
pub mod reader;

pub use cleaner::{DEFAULT_END_MARKER, clean, clean_text, normalize_artifacts};
pub use document::{Document, generate_doc_id};
pub use error::{IngestError, MarkerKind, Result};
pub use fetch::BookFetcher;
pub use reader::FileReader;

use std::path::Path;

/// Where a book comes from.
#[derive(Debug, Clone)]
pub enum BookSource {
    Url(String),
    File(std::path::PathBuf),
}

impl BookSource {
    pub fn describe(&self) -> String {
        match self {
            BookSource::Url(url) => url.clone(),
            BookSource::File(path) => path.to_string_lossy().to_string(),
        }
    }
}

/// Load a book from its source.
pub async fn load_document(source: &BookSource, fetcher: &BookFetcher) -> Result<Document> {
    match source {
        BookSource::Url(url) => fetcher.fetch(url).await,
        BookSource::File(path) => FileReader::read_file(Path::new(path)).await,
    }
}
