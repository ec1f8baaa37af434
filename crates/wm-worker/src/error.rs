//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Model error: {0}")]
    Model(#[from] wm_models::ModelError),

    #[error("Media error: {0}")]
    Media(#[from] wm_media::MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] wm_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether the submission itself was malformed.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, WorkerError::Model(_))
    }
}
