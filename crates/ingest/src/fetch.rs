use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::time::Duration;
use tracing::{debug, info};

use crate::document::Document;
use crate::error::{IngestError, Result};

/// Downloads raw book text over HTTP. Failures are returned as-is, no retries.
#[derive(Clone)]
pub struct BookFetcher {
    client: reqwest::Client,
}

impl BookFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IngestError::Client)?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<Document> {
        let start = std::time::Instant::now();
        debug!(url, "Fetching book");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| IngestError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let to_fetch_error = |source| IngestError::Fetch {
            url: url.to_string(),
            source,
        };

        // Without a declared charset the body is read as Latin-1, so UTF-8
        // punctuation reaches the cleaner as the mojibake it repairs.
        let text = if declares_charset(response.headers()) {
            response.text().await.map_err(to_fetch_error)?
        } else {
            let bytes = response.bytes().await.map_err(to_fetch_error)?;
            decode_latin1(&bytes)
        };

        info!(
            url,
            bytes = text.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched book"
        );

        Ok(Document::new(url, text))
    }
}

impl Default for BookFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn declares_charset(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("charset="))
}

/// ISO-8859-1: every byte is the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
