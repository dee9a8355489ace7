use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A downloaded (or locally read) book. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub source: String,
    pub text: String,
}

impl Document {
    pub fn new(source: impl Into<String>, text: String) -> Self {
        let source = source.into();
        let id = generate_doc_id(&source);

        Self { id, source, text }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Generate a stable document ID from its URL or path
pub fn generate_doc_id(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..16]) // first 16 bytes (32 hex chars)
}
