//! Logging setup.
//!
//! Installs a `tracing` subscriber with an `EnvFilter` (`RUST_LOG`, falling
//! back to the given default), a stdout layer, and optionally a daily-rotating
//! file layer. `log` records from dependencies are bridged into `tracing`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{AppError, AppResult};

const LOG_FILE_PREFIX: &str = "attendance.log";

/// Install the global subscriber.
///
/// When `log_dir` is given, the returned guard must be held for the lifetime
/// of the process; dropping it flushes and stops the file writer.
pub fn init_logger(default_filter: &str, log_dir: Option<&Path>) -> AppResult<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_target(true).with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::Logger(e.to_string()))?;
    tracing_log::LogTracer::init().map_err(|e| AppError::Logger(e.to_string()))?;

    Ok(guard)
}
