/// Convenience result type used across lottie-verify.
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Hard failures surfaced by the crate.
///
/// Structural errors, advisory warnings and inconclusive checks are report contents, not
/// errors. Only input that cannot be read or decoded at all ends up here.
#[derive(thiserror::Error, Debug)]
pub enum VerifyError {
    /// Input could not be read (missing file, permission denied, ...).
    #[error("load error: {0}")]
    Load(String),

    /// Input was read but is not a decodable animation document.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing reports or repaired documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VerifyError {
    /// Build a [`VerifyError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`VerifyError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`VerifyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
