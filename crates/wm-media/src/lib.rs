#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for watermark overlays.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Derivation of the overlay filter graph from job settings
//! - The transcoding engine boundary and its FFmpeg implementation

pub mod command;
pub mod engine;
pub mod error;
pub mod watermark;

pub use command::FfmpegCommand;
pub use engine::{FfmpegEngine, TranscodeEngine, TranscodeHandle};
pub use error::{MediaError, MediaResult};
pub use watermark::{overlay_xy, OverlayParams, TranscodeRequest, OVERLAY_MARGIN_PX};
