//! Input media files and extension-based classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ModelError;

/// Kind of input media, derived from the file extension at selection time.
///
/// Serialized as `"img"` / `"vid"` to stay compatible with the front-end.
/// Decoding goes through [`FromStr`] so unknown kinds are named in the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub enum MediaKind {
    /// Still image (png, jpg, jpeg)
    #[serde(rename = "img")]
    Image,
    /// Video (mp4)
    #[serde(rename = "vid")]
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "img",
            MediaKind::Video => "vid",
        }
    }

    /// Classify a path by its (case-insensitive) extension.
    ///
    /// Returns `None` for anything that is not a recognised input; such
    /// files never make it into a job.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp4" => Some(MediaKind::Video),
            "png" | "jpg" | "jpeg" => Some(MediaKind::Image),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "img" => Ok(MediaKind::Image),
            "vid" => Ok(MediaKind::Video),
            other => Err(ModelError::unknown_media_kind(other)),
        }
    }
}

impl TryFrom<String> for MediaKind {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One input media item of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConvertFile {
    /// Display name (base filename)
    pub name: String,
    /// Absolute path to the input
    pub path: PathBuf,
    /// Media kind
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

impl ConvertFile {
    /// Build a file entry from a selected path, or `None` if the extension
    /// is not a recognised media kind.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = MediaKind::from_path(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Some(Self { name, path, kind })
    }

    /// Directory containing the input, used when no output folder is set.
    pub fn parent_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Turn a raw file-picker selection into job inputs, dropping anything
/// unrecognised. Order of the selection is preserved.
pub fn classify_selection<I, P>(paths: I) -> Vec<ConvertFile>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths.into_iter().filter_map(ConvertFile::from_path).collect()
}
