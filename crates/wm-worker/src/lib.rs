//! Batch watermark worker.
//!
//! This crate provides:
//! - The batch runner (sequential, fail-fast)
//! - Progress emission over a pluggable event transport
//! - The submission processor (decode, persist settings, run)
//! - Worker configuration and structured batch logging

pub mod config;
pub mod error;
pub mod logging;
pub mod processor;
pub mod reporter;
pub mod runner;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::{BatchId, BatchLogger};
pub use processor::WatermarkProcessor;
pub use reporter::{
    ChannelTransport, EventTransport, ProgressReporter, StdoutTransport, TransportEvent,
    PROGRESS_EVENT, SELECT_FILES_EVENT, SELECT_OUTPUT_FOLDER_EVENT, SELECT_WATERMARK_EVENT,
};
pub use runner::{BatchOutcome, BatchRunner, BatchState};
