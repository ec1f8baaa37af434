//! FFmpeg command builder.

use std::path::{Path, PathBuf};

/// Builder for FFmpeg commands.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Primary input file path
    input: PathBuf,
    /// Additional inputs, in order after the primary one
    extra_inputs: Vec<PathBuf>,
    /// Output file path
    output: PathBuf,
    /// Output arguments (after all -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            extra_inputs: Vec::new(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add a secondary input (addressed as `[1]`, `[2]`, ... in filter graphs).
    pub fn additional_input(mut self, path: impl AsRef<Path>) -> Self {
        self.extra_inputs.push(path.as_ref().to_path_buf());
        self
    }

    /// Add output arguments (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Set filter complex.
    pub fn filter_complex(self, filter: impl Into<String>) -> Self {
        self.output_arg("-filter_complex").output_arg(filter)
    }

    /// Extract single frame.
    pub fn single_frame(self) -> Self {
        self.output_arg("-frames:v").output_arg("1")
    }

    /// Set log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-hide_banner".to_string());
        args.push("-v".to_string());
        args.push(self.log_level.clone());

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        for extra in &self.extra_inputs {
            args.push("-i".to_string());
            args.push(extra.to_string_lossy().to_string());
        }

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }

    /// Human-readable command line, for diagnostics only.
    pub fn command_line(&self, program: &str) -> String {
        let mut line = program.to_string();
        for arg in self.build_args() {
            line.push(' ');
            if arg.contains([' ', ';', '[', ']']) {
                line.push('"');
                line.push_str(&arg);
                line.push('"');
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = FfmpegCommand::new("input.mp4", "output.mp4")
            .additional_input("logo.png")
            .filter_complex("[0][1]overlay=5:5")
            .log_level("warning");

        let args = cmd.build_args();
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"warning".to_string()));

        let inputs: Vec<_> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-i")
            .map(|(i, _)| args[i + 1].as_str())
            .collect();
        assert_eq!(inputs, ["input.mp4", "logo.png"]);

        let fc = args.iter().position(|a| a == "-filter_complex").unwrap();
        assert_eq!(args[fc + 1], "[0][1]overlay=5:5");
        assert_eq!(args.last().unwrap(), "output.mp4");
    }

    #[test]
    fn test_single_frame() {
        let args = FfmpegCommand::new("a.png", "b.png").single_frame().build_args();
        assert!(args.windows(2).any(|w| w == ["-frames:v", "1"]));
    }

    #[test]
    fn test_command_line_quotes_filter() {
        let line = FfmpegCommand::new("a.mp4", "b.mp4")
            .filter_complex("[0]null[v];[v]null")
            .command_line("ffmpeg");
        assert!(line.starts_with("ffmpeg -y"));
        assert!(line.contains("\"[0]null[v];[v]null\""));
    }
}
