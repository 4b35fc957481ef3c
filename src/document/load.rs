use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::document::model::AnimationDocument;
use crate::foundation::error::{VerifyError, VerifyResult};

impl AnimationDocument {
    /// Decode a document from JSON bytes, recording the byte size for size checks.
    pub fn from_slice(bytes: &[u8]) -> VerifyResult<Self> {
        let raw: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| VerifyError::decode(format!("parse animation JSON: {e}")))?;
        if !raw.is_object() {
            return Err(VerifyError::decode(
                "animation document root must be a JSON object",
            ));
        }
        let mut doc = Self::deserialize(&raw)
            .map_err(|e| VerifyError::decode(format!("read animation document: {e}")))?;
        doc.byte_len = Some(bytes.len() as u64);
        tracing::debug!(bytes = bytes.len(), layers = doc.layers().len(), "decoded document");
        Ok(doc)
    }

    /// Decode a document from a JSON string.
    pub fn from_json_str(s: &str) -> VerifyResult<Self> {
        Self::from_slice(s.as_bytes())
    }

    /// Read and decode a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> VerifyResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| VerifyError::load(format!("read '{}': {e}", path.display())))?;
        Self::from_slice(&bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/load.rs"]
mod tests;
