//! Settings store.
//!
//! `save`/`load` never fail towards the caller: errors are logged and
//! absorbed. `try_save`/`try_load` expose the same operations with the
//! underlying [`StorageError`].

use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

use wm_models::JobDescriptor;

use crate::error::{StorageError, StorageResult};

/// Application directory under the per-user config dir.
pub const APP_DIR_NAME: &str = "WatermarkGenerator";
/// Settings file inside [`APP_DIR_NAME`].
pub const SETTINGS_FILE_NAME: &str = "config.json";

/// Reads and writes the persisted job settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    /// Base config directory; `None` when the platform has none
    base_dir: Option<PathBuf>,
}

impl SettingsStore {
    /// Store rooted at an explicit base config directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Store rooted at the platform's per-user config directory.
    pub fn from_user_config_dir() -> Self {
        Self {
            base_dir: dirs::config_dir(),
        }
    }

    /// `<base>/WatermarkGenerator`, without touching the filesystem.
    pub fn app_dir(&self) -> StorageResult<PathBuf> {
        self.base_dir
            .as_ref()
            .map(|base| base.join(APP_DIR_NAME))
            .ok_or_else(StorageError::config_dir_unavailable)
    }

    pub fn settings_path(&self) -> StorageResult<PathBuf> {
        Ok(self.app_dir()?.join(SETTINGS_FILE_NAME))
    }

    async fn ensure_app_dir(&self) -> StorageResult<PathBuf> {
        let dir = self.app_dir()?;
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Write the job's settings with `files` emptied, as indented JSON.
    /// Returns the path written.
    pub async fn try_save(&self, job: &JobDescriptor) -> StorageResult<PathBuf> {
        let path = self.ensure_app_dir().await?.join(SETTINGS_FILE_NAME);
        let body = serde_json::to_string_pretty(&job.settings_only())?;
        fs::write(&path, body).await?;
        debug!(path = %path.display(), "Settings saved");
        Ok(path)
    }

    /// Raw persisted settings. No decoding is performed.
    pub async fn try_load(&self) -> StorageResult<String> {
        let path = self.ensure_app_dir().await?.join(SETTINGS_FILE_NAME);
        Ok(fs::read_to_string(&path).await?)
    }

    /// Persist settings; failures are logged and otherwise ignored.
    pub async fn save(&self, job: &JobDescriptor) {
        if let Err(error) = self.try_save(job).await {
            warn!(%error, "Failed to save settings");
        }
    }

    /// Raw persisted settings, or an empty string if unavailable.
    pub async fn load(&self) -> String {
        match self.try_load().await {
            Ok(raw) => raw,
            Err(error) => {
                debug!(%error, "No settings loaded");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn job() -> JobDescriptor {
        JobDescriptor::from_payload(json!({
            "files": [{"name": "a.mp4", "path": "/in/a.mp4", "type": "vid"}],
            "transparent": 40,
            "size": 12,
            "watermark": "/wm/logo.png",
            "prefix": "wm_",
            "position": "bottom-left",
            "outputFolder": "/out"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());

        let path = store.try_save(&job()).await.unwrap();
        assert_eq!(path, dir.path().join(APP_DIR_NAME).join(SETTINGS_FILE_NAME));

        let raw = store.load().await;
        let loaded = JobDescriptor::from_json_str(&raw).unwrap();
        let original = job();

        assert!(loaded.files.is_empty());
        assert_eq!(loaded.output_prefix, original.output_prefix);
        assert_eq!(loaded.position, original.position);
        assert_eq!(loaded.scale_percent, original.scale_percent);
        assert_eq!(loaded.opacity_percent, original.opacity_percent);
        assert_eq!(loaded.output_folder, original.output_folder);
        assert_eq!(loaded.watermark_path, original.watermark_path);
    }

    #[tokio::test]
    async fn test_saved_file_is_indented_with_empty_files() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        store.save(&job()).await;

        let raw = store.load().await;
        assert!(raw.contains("\n  \"files\": []"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["position"], "bottom-left");
        assert_eq!(value["outputFolder"], "/out");
    }

    #[tokio::test]
    async fn test_load_missing_returns_empty() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());

        assert_eq!(store.load().await, "");
        // Directory is created even when nothing was saved yet
        assert!(dir.path().join(APP_DIR_NAME).is_dir());
    }

    #[tokio::test]
    async fn test_load_returns_raw_content_without_decoding() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        let path = store.settings_path().unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(store.load().await, "not json");
    }

    #[tokio::test]
    async fn test_unwritable_location_is_absorbed() {
        let dir = TempDir::new().unwrap();
        // A regular file where the base directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = SettingsStore::new(&blocker);

        store.save(&job()).await;
        assert!(store.try_save(&job()).await.is_err());
        assert_eq!(store.load().await, "");
    }

    #[tokio::test]
    async fn test_missing_config_dir() {
        let store = SettingsStore { base_dir: None };
        assert!(matches!(store.try_load().await, Err(StorageError::ConfigDirUnavailable)));
        assert_eq!(store.load().await, "");
    }
}
