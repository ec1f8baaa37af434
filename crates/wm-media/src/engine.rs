//! Transcoding engine boundary and the FFmpeg-backed implementation.
//!
//! An engine invocation has two failure points, both reported as
//! [`MediaError`]: [`TranscodeEngine::start`] (binary missing, spawn
//! failure) and [`TranscodeHandle::wait`] (non-zero exit).

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};
use crate::watermark::TranscodeRequest;

/// Black-box transcoder: takes a request, reports success or failure once.
pub trait TranscodeEngine: Send + Sync {
    /// Start one invocation. Returns immediately; completion is signalled
    /// through the returned handle.
    fn start(&self, request: &TranscodeRequest) -> MediaResult<TranscodeHandle>;
}

/// A running engine invocation.
#[derive(Debug)]
pub struct TranscodeHandle {
    command_line: String,
    done: oneshot::Receiver<MediaResult<()>>,
}

impl TranscodeHandle {
    pub fn new(command_line: impl Into<String>, done: oneshot::Receiver<MediaResult<()>>) -> Self {
        Self {
            command_line: command_line.into(),
            done,
        }
    }

    /// Handle whose outcome is already known.
    pub fn finished(command_line: impl Into<String>, result: MediaResult<()>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self::new(command_line, rx)
    }

    /// Command representation, for diagnostics.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Await the single completion signal.
    pub async fn wait(self) -> MediaResult<()> {
        self.done
            .await
            .unwrap_or_else(|_| Err(MediaError::internal("engine dropped its completion signal")))
    }
}

/// Runs the `ffmpeg` CLI.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    /// Program name or path, resolved through `PATH` on every start
    program: OsString,
    /// Log level passed as `-v`
    log_level: String,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegEngine {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            log_level: "error".to_string(),
        }
    }

    /// Set FFmpeg log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Resolve the executable.
    pub fn resolve(&self) -> MediaResult<PathBuf> {
        which::which(&self.program).map_err(|e| {
            MediaError::FfmpegNotFound(format!("{}: {e}", self.program.to_string_lossy()))
        })
    }
}

impl TranscodeEngine for FfmpegEngine {
    fn start(&self, request: &TranscodeRequest) -> MediaResult<TranscodeHandle> {
        let program = self.resolve()?;
        let cmd = request.to_command().log_level(self.log_level.clone());
        let command_line = cmd.command_line(&program.to_string_lossy());
        debug!(command = %command_line, "Running FFmpeg");

        let child = Command::new(&program)
            .args(cmd.build_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                MediaError::ffmpeg_failed(format!("Failed to spawn FFmpeg: {e}"), None, None)
            })?;

        let (tx, rx) = oneshot::channel();
        let output = request.output.clone();
        tokio::spawn(async move {
            let result = match child.wait_with_output().await {
                Ok(out) if out.status.success() => Ok(()),
                Ok(out) => {
                    let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
                    warn!(
                        output = %output.display(),
                        exit_code = ?out.status.code(),
                        "FFmpeg exited with failure"
                    );
                    Err(MediaError::ffmpeg_failed(
                        failure_message(out.status.code(), &stderr),
                        Some(stderr),
                        out.status.code(),
                    ))
                }
                Err(e) => Err(MediaError::from(e)),
            };
            let _ = tx.send(result);
        });

        Ok(TranscodeHandle::new(command_line, rx))
    }
}

/// One-line failure summary: exit code plus the last stderr line.
fn failure_message(exit_code: Option<i32>, stderr: &str) -> String {
    let status = match exit_code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    };

    match stderr.lines().map(str::trim).filter(|l| !l.is_empty()).last() {
        Some(last) => format!("{status}: {last}"),
        None => status,
    }
}
