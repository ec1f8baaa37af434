//! Shared data models for the watermark generator.
//!
//! This crate provides Serde-serializable types for:
//! - Job submissions and persisted settings
//! - Input media files and their classification
//! - Overlay positions
//! - Progress events sent back to the front-end

pub mod error;
pub mod job;
pub mod media;
pub mod position;
pub mod progress;

// Re-export common types
pub use error::{ModelError, ModelResult};
pub use job::{JobDescriptor, PercentField, PercentOutOfRange};
pub use media::{classify_selection, ConvertFile, MediaKind};
pub use position::Position;
pub use progress::Progress;
