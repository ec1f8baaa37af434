//! Progress reporting to the front-end event transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use wm_models::{ConvertFile, Progress};

/// Event name for [`Progress`] payloads.
pub const PROGRESS_EVENT: &str = "progress";
/// Event name for a classified file selection.
pub const SELECT_FILES_EVENT: &str = "selectFiles";
/// Event name for a chosen watermark image; the payload is the raw path.
pub const SELECT_WATERMARK_EVENT: &str = "selectWatermark";
/// Event name for a chosen output folder; the payload is the raw path.
pub const SELECT_OUTPUT_FOLDER_EVENT: &str = "selectOutputFolder";

/// Delivers named events with a string payload to the front-end.
pub trait EventTransport: Send + Sync {
    fn emit(&self, event: &str, payload: String);
}

/// One emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportEvent {
    pub event: String,
    pub data: String,
}

/// Writes events as JSON lines on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutTransport;

#[derive(Serialize)]
struct EventLine<'a> {
    event: &'a str,
    data: &'a str,
    timestamp: DateTime<Utc>,
}

impl EventTransport for StdoutTransport {
    fn emit(&self, event: &str, payload: String) {
        let line = EventLine {
            event,
            data: &payload,
            timestamp: Utc::now(),
        };
        let result = serde_json::to_string(&line)
            .map_err(std::io::Error::from)
            .and_then(|json| {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{json}")?;
                out.flush()
            });
        if let Err(error) = result {
            warn!(event, %error, "Failed to write event");
        }
    }
}

/// Forwards events into an in-process channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: UnboundedSender<TransportEvent>,
}

impl ChannelTransport {
    pub fn new() -> (Self, UnboundedReceiver<TransportEvent>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventTransport for ChannelTransport {
    fn emit(&self, event: &str, payload: String) {
        let sent = self.tx.send(TransportEvent {
            event: event.to_string(),
            data: payload,
        });
        if sent.is_err() {
            debug!(event, "Event receiver dropped");
        }
    }
}

/// Serializes reports and pushes them to a transport. Fire-and-forget:
/// nothing is retried and nothing is returned to the caller.
#[derive(Debug, Clone)]
pub struct ProgressReporter<T> {
    transport: T,
}

impl<T: EventTransport> ProgressReporter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn report(&self, progress: &Progress) {
        match serde_json::to_string(progress) {
            Ok(payload) => self.transport.emit(PROGRESS_EVENT, payload),
            Err(error) => warn!(%error, "Failed to serialize progress"),
        }
    }

    /// Report a classified selection. Empty selections are not reported.
    pub fn report_selection(&self, files: &[ConvertFile]) {
        if files.is_empty() {
            return;
        }
        match serde_json::to_string(files) {
            Ok(payload) => self.transport.emit(SELECT_FILES_EVENT, payload),
            Err(error) => warn!(%error, "Failed to serialize selection"),
        }
    }

    pub fn report_watermark(&self, path: &Path) {
        self.transport.emit(SELECT_WATERMARK_EVENT, path.to_string_lossy().into_owned());
    }

    pub fn report_output_folder(&self, path: &Path) {
        self.transport.emit(SELECT_OUTPUT_FOLDER_EVENT, path.to_string_lossy().into_owned());
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
