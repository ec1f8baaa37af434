//! Persisted job settings.
//!
//! The non-file fields of the last submitted job are kept in
//! `<config dir>/WatermarkGenerator/config.json` so the front-end can
//! restore them on the next start.

pub mod error;
pub mod settings;

pub use error::{StorageError, StorageResult};
pub use settings::{SettingsStore, APP_DIR_NAME, SETTINGS_FILE_NAME};
