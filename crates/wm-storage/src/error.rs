//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while persisting settings.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No per-user configuration directory available")]
    ConfigDirUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    /// Create an error for a platform without a per-user config directory.
    pub fn config_dir_unavailable() -> Self {
        Self::ConfigDirUnavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_unavailable() {
        let error = StorageError::config_dir_unavailable();
        assert!(matches!(error, StorageError::ConfigDirUnavailable));
        assert_eq!(
            error.to_string(),
            "No per-user configuration directory available"
        );
    }
}
