//! Progress events reported once per processed file.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ConvertFile;

/// Status of a batch after one file outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Share of files completed (0-100)
    pub percentage: u8,
    /// File just finished or attempted
    pub current_file: ConvertFile,
    /// False once the batch has ended, successfully or not
    pub running: bool,
    /// Empty on success
    pub error: String,
}

impl Progress {
    /// Progress after file `index` (0-based) of `total` succeeded.
    ///
    /// The last file yields the terminal event.
    pub fn file_done(index: usize, total: usize, file: ConvertFile) -> Self {
        if index + 1 >= total {
            return Self::completed(file);
        }

        Self {
            percentage: completed_percentage(index + 1, total),
            current_file: file,
            running: true,
            error: String::new(),
        }
    }

    /// Terminal event for a batch that processed every file.
    pub fn completed(file: ConvertFile) -> Self {
        Self {
            percentage: 100,
            current_file: file,
            running: false,
            error: String::new(),
        }
    }

    /// Terminal event for a batch aborted by `file`.
    pub fn failed(file: ConvertFile, error: impl Into<String>) -> Self {
        Self {
            percentage: 100,
            current_file: file,
            running: false,
            error: error.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !self.running
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// `floor(done / total * 100)`, computed exactly in integers.
fn completed_percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.min(total) * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> ConvertFile {
        ConvertFile::from_path("/in/a.mp4").unwrap()
    }

    #[test]
    fn test_intermediate_percentages_floor() {
        assert_eq!(Progress::file_done(0, 3, file()).percentage, 33);
        assert_eq!(Progress::file_done(1, 3, file()).percentage, 66);
        assert_eq!(Progress::file_done(0, 7, file()).percentage, 14);
        assert!(Progress::file_done(0, 3, file()).running);
    }

    #[test]
    fn test_last_file_is_terminal() {
        let progress = Progress::file_done(2, 3, file());
        assert_eq!(progress.percentage, 100);
        assert!(progress.is_terminal());
        assert!(!progress.is_error());
    }

    #[test]
    fn test_failed_is_terminal_error() {
        let progress = Progress::failed(file(), "exit status 1");
        assert_eq!(progress.percentage, 100);
        assert!(progress.is_terminal());
        assert_eq!(progress.error, "exit status 1");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(Progress::file_done(0, 2, file())).unwrap();
        assert_eq!(json["percentage"], 50);
        assert_eq!(json["running"], true);
        assert_eq!(json["error"], "");
        assert_eq!(json["currentFile"]["type"], "vid");
    }
}
