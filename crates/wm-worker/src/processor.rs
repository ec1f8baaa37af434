//! Job submission entry point: decode, persist settings, run the batch.

use tracing::warn;

use wm_media::TranscodeEngine;
use wm_models::JobDescriptor;
use wm_storage::SettingsStore;

use crate::error::WorkerResult;
use crate::reporter::EventTransport;
use crate::runner::{BatchOutcome, BatchRunner};

/// Handles submissions from the front-end, one job at a time.
pub struct WatermarkProcessor<E, T> {
    settings: SettingsStore,
    runner: BatchRunner<E, T>,
}

impl<E, T> WatermarkProcessor<E, T>
where
    E: TranscodeEngine,
    T: EventTransport,
{
    pub fn new(settings: SettingsStore, runner: BatchRunner<E, T>) -> Self {
        Self { settings, runner }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn runner(&self) -> &BatchRunner<E, T> {
        &self.runner
    }

    /// Process a loosely-typed submission.
    ///
    /// A payload that does not decode is returned as an error before any
    /// settings are written or any event is emitted.
    pub async fn process(&self, payload: serde_json::Value) -> WorkerResult<BatchOutcome> {
        let job = JobDescriptor::from_payload(payload).inspect_err(|error| {
            warn!(%error, "Rejected job submission");
        })?;
        Ok(self.process_job(&job).await)
    }

    /// Same as [`Self::process`] for a raw JSON string.
    pub async fn process_str(&self, payload: &str) -> WorkerResult<BatchOutcome> {
        let job = JobDescriptor::from_json_str(payload).inspect_err(|error| {
            warn!(%error, "Rejected job submission");
        })?;
        Ok(self.process_job(&job).await)
    }

    /// Persist the job's settings, then run it.
    pub async fn process_job(&self, job: &JobDescriptor) -> BatchOutcome {
        self.settings.save(job).await;
        self.runner.run(job).await
    }

    /// Raw persisted settings, empty when none are available.
    pub async fn read_settings(&self) -> String {
        self.settings.load().await
    }
}
