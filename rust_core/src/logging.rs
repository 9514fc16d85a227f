//! Logging setup shared by the bot binaries
//!
//! Two sinks:
//! - stderr, filtered by `RUST_LOG` (defaults to `info`)
//! - a rolling log file with everything from our own crates at `debug`
//!
//! The file is written through a non-blocking worker. Keep the returned
//! [`WorkerGuard`] alive for the lifetime of the process and drop it before
//! calling `std::process::exit`, otherwise buffered lines are lost.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Rotated files kept next to the active one
pub const MAX_LOG_FILES: usize = 5;

const FILE_FILTER: &str = "info,homework_rust_core=debug,homework_bot_rust=debug,homework_bot=debug";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to create log file appender in {dir}: {reason}")]
    Appender { dir: PathBuf, reason: String },

    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(log_path: &Path) -> Result<WorkerGuard, LoggingError> {
    let (dir, prefix, suffix) = split_log_path(log_path);

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(MAX_LOG_FILES);
    if let Some(suffix) = suffix {
        builder = builder.filename_suffix(suffix);
    }
    let appender = builder.build(&dir).map_err(|e| LoggingError::Appender {
        dir: dir.clone(),
        reason: e.to_string(),
    })?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(stderr_filter),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(EnvFilter::new(FILE_FILTER)),
        )
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))?;

    Ok(guard)
}

/// Split `dir/name.ext` into the appender's directory, prefix and suffix
fn split_log_path(path: &Path) -> (PathBuf, String, Option<String>) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "homework_bot".to_string());
    let suffix = path
        .extension()
        .map(|s| s.to_string_lossy().into_owned());
    (dir, prefix, suffix)
}
