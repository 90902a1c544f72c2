use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogRotation, LoggingConfig};
use crate::Result;

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
        }
    }
}

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        "enzona_watcher=debug,info".to_string()
    } else {
        config.level.clone()
    }
}

/// Creates the log directory (if needed) and the appender writing into it.
pub fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    let directory = Path::new(&config.directory);
    fs::create_dir_all(directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(&config.file_name)
        .build(directory)?;

    Ok(appender)
}

/// Installs console and file logging for this run.
///
/// Keep the returned guard alive until exit; dropping it flushes the file writer.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(config)?);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config, verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
