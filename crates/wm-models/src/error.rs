//! Model error types.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while decoding boundary payloads.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid job submission: {0}")]
    InvalidSubmission(#[from] serde_json::Error),

    #[error("Unknown media type: {0:?}")]
    UnknownMediaKind(String),
}

impl ModelError {
    pub fn unknown_media_kind(value: impl Into<String>) -> Self {
        Self::UnknownMediaKind(value.into())
    }
}
