pub mod app;
pub mod assessment;
pub mod cli;
pub mod config;
pub mod intelligence;
pub mod models;
pub mod report;
pub mod roster;
pub mod session;

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Error, Debug)]
pub enum TracingInitError {
    #[error("Cannot open log file {file}: {source}")]
    LogFile {
        file: String,
        #[source]
        source: tracing_appender::rolling::InitError,
    },

    #[error("Cannot install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Initialize tracing: console (stderr) plus an appended log file.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_tracing(log_dir: &Path, log_file: &str) -> Result<WorkerGuard, TracingInitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(log_file)
        .build(log_dir)
        .map_err(|source| TracingInitError::LogFile {
            file: log_dir.join(log_file).display().to_string(),
            source,
        })?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()?;

    Ok(guard)
}
