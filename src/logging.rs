use anyhow::Result;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::metrics::MetricsCollector;

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!(
                "Invalid log format: {other}. Must be one of: [\"text\", \"json\"]"
            )),
        }
    }
}

/// Initialize structured logging system
///
/// The console layer follows `format`; the optional file is always JSON.
/// The returned guard flushes the file writer on drop and must outlive logging.
pub fn init_logging(
    log_level: Option<&str>,
    format: LogFormat,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))
        .map_err(|e| anyhow::anyhow!("Failed to create log filter: {}", e))?;

    let console_layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .json()
            .boxed(),
    };

    let (file_layer, guard) = match log_file {
        Some(log_path) => {
            let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = log_path
                .file_name()
                .map_or_else(|| "mindcare-chat.log".into(), |n| n.to_string_lossy().into_owned());
            let (writer, guard) = non_blocking(rolling::daily(directory, file_name));
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .json();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;

    info!(?format, "Logging system initialized");
    Ok(guard)
}

/// Times one named operation and reports it to the log and the duration histogram
#[derive(Debug)]
pub struct OperationTimer<'a> {
    operation: &'static str,
    metrics: &'a MetricsCollector,
    start: Instant,
}

impl<'a> OperationTimer<'a> {
    /// Start timing `operation`
    #[must_use]
    pub fn start(operation: &'static str, metrics: &'a MetricsCollector) -> Self {
        Self {
            operation,
            metrics,
            start: Instant::now(),
        }
    }

    /// Stop the clock, log at debug and record the elapsed time
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        tracing::debug!(
            operation = self.operation,
            elapsed_ms = elapsed.as_millis(),
            "operation finished"
        );
        self.metrics.record_operation_duration(self.operation, elapsed);
        elapsed
    }
}
