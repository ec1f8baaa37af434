//! Job descriptor: one watermarking batch as submitted by the front-end.

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ModelResult;
use crate::{ConvertFile, Position};

/// Validated in-memory representation of one watermarking job.
///
/// The serialized form is also the persisted settings shape, with
/// `files` always written as `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JobDescriptor {
    /// Inputs in processing order
    pub files: Vec<ConvertFile>,

    /// Transparency level in percent; the overlay keeps `(100 - value)%` alpha
    #[serde(rename = "transparent")]
    pub opacity_percent: i32,

    /// Watermark height as a percentage of the frame height
    #[serde(rename = "size")]
    pub scale_percent: i32,

    /// Still image composited onto every input
    #[serde(rename = "watermark")]
    pub watermark_path: PathBuf,

    /// Prepended to every output filename
    #[serde(rename = "prefix", default)]
    pub output_prefix: String,

    #[serde(default)]
    #[schemars(with = "String")]
    pub position: Position,

    /// Destination folder; empty writes next to each input
    #[serde(rename = "outputFolder", default)]
    pub output_folder: String,
}

impl JobDescriptor {
    /// Decode a loosely-typed boundary payload.
    ///
    /// Fails as a whole if the payload does not match the job shape; no
    /// partial job is ever produced.
    pub fn from_payload(payload: serde_json::Value) -> ModelResult<Self> {
        Ok(serde_json::from_value(payload)?)
    }

    pub fn from_json_str(payload: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Output folder, if one was chosen.
    pub fn output_folder(&self) -> Option<&Path> {
        if self.output_folder.is_empty() {
            None
        } else {
            Some(Path::new(&self.output_folder))
        }
    }

    /// Destination for one input: `<folder>/<prefix><name>`, where folder is
    /// the output folder or the input's own directory.
    pub fn output_path_for(&self, file: &ConvertFile) -> PathBuf {
        let out_name = format!("{}{}", self.output_prefix, file.name);
        match self.output_folder() {
            Some(folder) => folder.join(out_name),
            None => file.parent_dir().join(out_name),
        }
    }

    /// Copy of the non-file settings, as persisted between sessions.
    pub fn settings_only(&self) -> Self {
        Self {
            files: Vec::new(),
            ..self.clone()
        }
    }

    /// Percentages outside `0..=100`. These are reported, never clamped.
    pub fn out_of_range_percentages(&self) -> Vec<PercentOutOfRange> {
        [
            (PercentField::Size, self.scale_percent),
            (PercentField::Transparent, self.opacity_percent),
        ]
        .into_iter()
        .filter(|(_, value)| !(0..=100).contains(value))
        .map(|(field, value)| PercentOutOfRange { field, value })
        .collect()
    }

    /// JSON schema of the submission payload.
    pub fn submission_schema() -> RootSchema {
        schemars::schema_for!(JobDescriptor)
    }
}

/// Percentage fields of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentField {
    Size,
    Transparent,
}

impl PercentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PercentField::Size => "size",
            PercentField::Transparent => "transparent",
        }
    }
}

/// A percentage field holding a value outside `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentOutOfRange {
    pub field: PercentField,
    pub value: i32,
}

impl fmt::Display for PercentOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} is outside 0..=100", self.field.as_str(), self.value)
    }
}
