use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::document::Document;
use crate::error::{IngestError, Result};

/// Reads a book that was already downloaded to disk.
pub struct FileReader;

impl FileReader {
    pub async fn read_file(path: &Path) -> Result<Document> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension {
            "txt" | "md" => {
                let path_str = path.to_string_lossy().to_string();
                let text = fs::read_to_string(path)
                    .await
                    .map_err(|source| IngestError::Read {
                        path: path_str.clone(),
                        source,
                    })?;
                debug!(path = %path_str, bytes = text.len(), "Read book from disk");
                Ok(Document::new(path_str, text))
            }
            _ => Err(IngestError::UnsupportedFormat(extension.to_string())),
        }
    }
}
