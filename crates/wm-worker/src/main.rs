//! Watermark worker binary.
//!
//! Events for the front-end are written to stdout as JSON lines; logs go
//! to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wm_models::{classify_selection, JobDescriptor};
use wm_worker::{
    BatchOutcome, BatchRunner, ProgressReporter, StdoutTransport, WatermarkProcessor, WorkerConfig,
};

#[derive(Debug, Parser)]
#[command(version, about = "Batch watermark images and videos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a job submission (JSON file, or `-` / nothing for stdin)
    Run { payload: Option<PathBuf> },
    /// Print the persisted settings
    Settings,
    /// Classify selected files and print the `selectFiles` event
    Classify { paths: Vec<PathBuf> },
    /// Print the `selectWatermark` event for a chosen watermark image
    SelectWatermark { path: PathBuf },
    /// Print the `selectOutputFolder` event for a chosen output folder
    SelectOutputFolder { path: PathBuf },
    /// Print the JSON schema of a job submission
    Schema,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let config = WorkerConfig::from_env();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(2);
    }

    let reporter = ProgressReporter::new(StdoutTransport);

    match cli.command {
        Command::Run { payload } => {
            info!("Worker config: {:?}", config);
            let raw = match read_payload(payload).await {
                Ok(raw) => raw,
                Err(e) => {
                    error!("Failed to read job submission: {:#}", e);
                    std::process::exit(2);
                }
            };

            let runner = BatchRunner::new(config.engine(), reporter);
            let processor = WatermarkProcessor::new(config.settings_store(), runner);

            match processor.process_str(&raw).await {
                Ok(BatchOutcome::Completed { processed }) => {
                    info!(processed, "Job finished");
                }
                Ok(BatchOutcome::Failed { index, error, .. }) => {
                    error!(index, "Job aborted: {}", error);
                    std::process::exit(1);
                }
                Err(e) => {
                    error!("Job rejected: {}", e);
                    std::process::exit(2);
                }
            }
        }
        Command::Settings => {
            let raw = config.settings_store().load().await;
            if !raw.is_empty() {
                println!("{raw}");
            }
        }
        Command::Classify { paths } => {
            reporter.report_selection(&classify_selection(paths));
        }
        Command::SelectWatermark { path } => reporter.report_watermark(&path),
        Command::SelectOutputFolder { path } => reporter.report_output_folder(&path),
        Command::Schema => match serde_json::to_string_pretty(&JobDescriptor::submission_schema()) {
            Ok(schema) => println!("{schema}"),
            Err(e) => {
                error!("Failed to render schema: {}", e);
                std::process::exit(1);
            }
        },
    }
}

/// Colored output for dev, JSON with `LOG_FORMAT=json`. Always on stderr.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

async fn read_payload(path: Option<PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("reading stdin")?;
            Ok(raw)
        }
    }
}
