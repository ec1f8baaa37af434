//! Worker configuration.

use std::path::PathBuf;

use wm_media::FfmpegEngine;
use wm_storage::SettingsStore;

use crate::error::{WorkerError, WorkerResult};

/// Log levels accepted by `ffmpeg -v`.
const FFMPEG_LOG_LEVELS: &[&str] = &[
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// FFmpeg executable name or path
    pub ffmpeg_bin: String,
    /// FFmpeg log level (`-v`)
    pub ffmpeg_log_level: String,
    /// Base directory for persisted settings; the platform config dir when unset
    pub config_dir: Option<PathBuf>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            ffmpeg_log_level: "error".to_string(),
            config_dir: None,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            ffmpeg_bin: std::env::var("WM_FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffmpeg_log_level: std::env::var("WM_FFMPEG_LOGLEVEL")
                .unwrap_or_else(|_| "error".to_string()),
            config_dir: std::env::var("WM_CONFIG_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> WorkerResult<()> {
        if self.ffmpeg_bin.trim().is_empty() {
            return Err(WorkerError::config_error("WM_FFMPEG_BIN cannot be empty"));
        }
        if !FFMPEG_LOG_LEVELS.contains(&self.ffmpeg_log_level.as_str()) {
            return Err(WorkerError::config_error(format!(
                "Unsupported FFmpeg log level: {}. Use one of {}",
                self.ffmpeg_log_level,
                FFMPEG_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn engine(&self) -> FfmpegEngine {
        FfmpegEngine::new(&self.ffmpeg_bin).with_log_level(self.ffmpeg_log_level.clone())
    }

    pub fn settings_store(&self) -> SettingsStore {
        match &self.config_dir {
            Some(dir) => SettingsStore::new(dir),
            None => SettingsStore::from_user_config_dir(),
        }
    }
}
