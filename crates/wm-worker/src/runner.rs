//! Batch runner: drives the engine over a job's files, one at a time.
//!
//! Each file is fully transcoded before the next one starts. The first
//! engine failure ends the batch; later files are never attempted.

use metrics::counter;
use tracing::{debug, Instrument};

use wm_media::{MediaResult, TranscodeEngine, TranscodeRequest};
use wm_models::{ConvertFile, JobDescriptor, Progress};

use crate::logging::BatchLogger;
use crate::reporter::{EventTransport, ProgressReporter};

/// Lifecycle of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    Completed,
    Failed,
}

impl BatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchState::Idle => "idle",
            BatchState::Running => "running",
            BatchState::Completed => "completed",
            BatchState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchState::Completed | BatchState::Failed)
    }
}

/// How a batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Every file was processed (zero for an empty job)
    Completed { processed: usize },
    /// The engine failed on `file` at `index`
    Failed {
        index: usize,
        file: ConvertFile,
        error: String,
    },
}

impl BatchOutcome {
    pub fn state(&self) -> BatchState {
        match self {
            BatchOutcome::Completed { .. } => BatchState::Completed,
            BatchOutcome::Failed { .. } => BatchState::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Completed { .. })
    }
}

/// Runs watermark batches against an engine, reporting through a transport.
pub struct BatchRunner<E, T> {
    engine: E,
    reporter: ProgressReporter<T>,
}

impl<E, T> BatchRunner<E, T>
where
    E: TranscodeEngine,
    T: EventTransport,
{
    pub fn new(engine: E, reporter: ProgressReporter<T>) -> Self {
        Self { engine, reporter }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn reporter(&self) -> &ProgressReporter<T> {
        &self.reporter
    }

    /// Process every file of `job` in order.
    ///
    /// Emits one progress event per file outcome. An empty job invokes
    /// nothing and emits nothing.
    pub async fn run(&self, job: &JobDescriptor) -> BatchOutcome {
        let logger = BatchLogger::new("watermark");
        let span = logger.create_span();
        self.run_batch(job, &logger).instrument(span).await
    }

    async fn run_batch(&self, job: &JobDescriptor, logger: &BatchLogger) -> BatchOutcome {
        let total = job.files.len();
        if total == 0 {
            debug!("Empty batch, nothing to do");
            return BatchOutcome::Completed { processed: 0 };
        }

        for flagged in job.out_of_range_percentages() {
            logger.log_warning(&flagged.to_string());
        }

        counter!("wm_batches_total").increment(1);
        logger.log_start(total);
        debug!(
            from = BatchState::Idle.as_str(),
            to = BatchState::Running.as_str(),
            "Batch state change"
        );

        for (index, file) in job.files.iter().enumerate() {
            let request = TranscodeRequest::for_file(job, file);

            if let Err(error) = self.transcode(&request).await {
                let message = error.to_string();
                counter!("wm_batch_failures_total").increment(1);
                logger.log_error(index, &message);
                self.reporter.report(&Progress::failed(file.clone(), message.clone()));
                return BatchOutcome::Failed {
                    index,
                    file: file.clone(),
                    error: message,
                };
            }

            counter!("wm_files_processed_total").increment(1);
            logger.log_file_done(index, total, &request.output.to_string_lossy());
            self.reporter.report(&Progress::file_done(index, total, file.clone()));
        }

        logger.log_completion(total);
        BatchOutcome::Completed { processed: total }
    }

    /// One engine invocation, awaited to completion.
    async fn transcode(&self, request: &TranscodeRequest) -> MediaResult<()> {
        let handle = self.engine.start(request)?;
        debug!(command = handle.command_line(), "Engine started");
        handle.wait().await
    }
}
