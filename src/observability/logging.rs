use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{PipelineError, Result};

/// Initializes console logging, plus a daily-rotated JSON file when configured.
///
/// The returned guard flushes the file writer when dropped; hold it for the
/// lifetime of the process. Fails when the log directory cannot be created or
/// a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    // Respect RUST_LOG if set; otherwise use the configured directive
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    if !config.json_file {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer())
            .try_init()
            .map_err(|e| PipelineError::Config(format!("cannot install logger: {}", e)))?;
        return Ok(None);
    }

    let file_appender = file_appender(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer())
        .try_init()
        .map_err(|e| PipelineError::Config(format!("cannot install logger: {}", e)))?;

    Ok(Some(guard))
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
}

fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    fs::create_dir_all(&config.directory).map_err(|e| {
        PipelineError::Config(format!(
            "cannot create log directory '{}': {}",
            config.directory.display(),
            e
        ))
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("court-lists")
        .filename_suffix("log")
        .build(&config.directory)
        .map_err(|e| {
            PipelineError::Config(format!(
                "cannot open log file in '{}': {}",
                config.directory.display(),
                e
            ))
        })
}
