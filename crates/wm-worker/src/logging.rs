//! Structured batch logging utilities.
//!
//! Provides consistent, structured logging for batch processing with
//! tracing spans and contextual information.

use std::fmt;
use tracing::{error, info, warn, Span};
use uuid::Uuid;

/// Identifier used to correlate the log lines of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchId(String);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Batch logger for structured logging with consistent formatting.
#[derive(Debug, Clone)]
pub struct BatchLogger {
    batch_id: BatchId,
    operation: String,
}

impl BatchLogger {
    /// Create a new logger for a fresh batch.
    ///
    /// # Arguments
    /// * `operation` - The type of operation (e.g., "watermark")
    pub fn new(operation: &str) -> Self {
        Self {
            batch_id: BatchId::new(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, total: usize) {
        info!(
            batch_id = %self.batch_id,
            operation = %self.operation,
            total,
            "Batch started"
        );
    }

    pub fn log_file_done(&self, index: usize, total: usize, output: &str) {
        info!(
            batch_id = %self.batch_id,
            operation = %self.operation,
            index,
            total,
            output,
            "File watermarked"
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            batch_id = %self.batch_id,
            operation = %self.operation,
            "Batch warning: {}", message
        );
    }

    pub fn log_error(&self, index: usize, message: &str) {
        error!(
            batch_id = %self.batch_id,
            operation = %self.operation,
            index,
            "Batch aborted: {}", message
        );
    }

    pub fn log_completion(&self, processed: usize) {
        info!(
            batch_id = %self.batch_id,
            operation = %self.operation,
            processed,
            "Batch completed"
        );
    }

    pub fn batch_id(&self) -> &BatchId {
        &self.batch_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Create a tracing span for this batch.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "batch",
            batch_id = %self.batch_id,
            operation = %self.operation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_logger_creation() {
        let logger = BatchLogger::new("watermark");
        assert_eq!(logger.operation(), "watermark");
        assert!(Uuid::parse_str(logger.batch_id().as_str()).is_ok());
    }

    #[test]
    fn test_batch_ids_are_unique() {
        assert_ne!(BatchLogger::new("a").batch_id(), BatchLogger::new("a").batch_id());
    }
}
