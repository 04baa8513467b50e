//! Telemetry and tracing utilities
//!
//! This module provides utilities for initializing and configuring tracing subscribers.
//! Library code only emits `tracing` events under `kilocode::*` targets; hosts that
//! already install a subscriber can skip this module entirely.
//!
//! ## Example
//!
//! ```rust,ignore
//! use kilocode_provider::telemetry::{init_subscriber, SubscriberConfig, OutputFormat};
//!
//! // Initialize with default configuration
//! init_subscriber(SubscriberConfig::default())?;
//!
//! // Initialize with custom configuration
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::defaults::logging::{FILE_ENV, FORMAT_ENV, LEVEL_ENV};
use crate::error::{ProviderError, Result};

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format with thread metadata
    Json,
    /// JSON with event fields flattened into the top-level object
    JsonCompact,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(ProviderError::TelemetryInit(format!(
                "Invalid log format: {format}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Log level
    pub log_level: tracing::Level,
    /// Output format
    pub output_format: OutputFormat,
    /// Enable console (stderr) output
    pub enable_console: bool,
    /// Log file path (optional)
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    /// Create a new builder for SubscriberConfig
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Filter directive applied to the crate's targets
    pub fn filter_directive(&self) -> String {
        let level = level_str(self.log_level);
        format!("kilocode={level}")
    }
}

/// Builder for SubscriberConfig
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    /// Set the log level
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = match level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            "error" => tracing::Level::ERROR,
            _ => {
                return Err(ProviderError::TelemetryInit(format!(
                    "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
                )));
            }
        };
        self.log_level = Some(level);
        Ok(self)
    }

    /// Set the output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Enable or disable console output
    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    /// Set the log file path
    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

const fn level_str(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::TRACE => "trace",
        tracing::Level::DEBUG => "debug",
        tracing::Level::INFO => "info",
        tracing::Level::WARN => "warn",
        tracing::Level::ERROR => "error",
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn format_layer<W>(format: OutputFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);
    match format {
        OutputFormat::Text => layer.boxed(),
        OutputFormat::Json => layer
            .json()
            .with_thread_ids(true)
            .with_thread_names(true)
            .boxed(),
        OutputFormat::JsonCompact => layer.json().flatten_event(true).boxed(),
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let file_name = path.file_name().ok_or_else(|| {
        ProviderError::TelemetryInit(format!("Log file path has no file name: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(file_name)))
}

/// Initialize tracing subscriber with the given configuration
///
/// ## Returns
///
/// - `Ok(Some(WorkerGuard))` when file logging is enabled. The guard must be kept alive
///   for the duration of the program or buffered lines are lost.
/// - `Ok(None)` otherwise, or when a global subscriber was already installed
/// - `Err(ProviderError::TelemetryInit)` if initialization fails
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| ProviderError::TelemetryInit(format!("Invalid filter: {e}")))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.enable_console {
        layers.push(format_layer(config.output_format, std::io::stderr, true));
    }

    let mut guard = None;
    if let Some(path) = &config.log_file {
        let (dir, file_name) = split_log_path(path)?;
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(format_layer(config.output_format, writer, false));
        guard = Some(worker_guard);
    }

    let init_result = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init();

    // Handle the case where tracing is already initialized
    match init_result {
        Ok(()) => Ok(guard),
        Err(e) => {
            let error_msg = e.to_string();
            if error_msg.contains("already been set") {
                Ok(None)
            } else {
                Err(ProviderError::TelemetryInit(format!(
                    "Failed to initialize tracing: {e}"
                )))
            }
        }
    }
}

/// Build a subscriber configuration from environment variables
///
/// Supported environment variables:
/// - `KILOCODE_LOG_LEVEL`: Log level (trace, debug, info, warn, error)
/// - `KILOCODE_LOG_FORMAT`: Output format (text, json, json-compact)
/// - `KILOCODE_LOG_FILE`: Log file path
pub fn config_from_env() -> Result<SubscriberConfig> {
    let mut builder = SubscriberConfig::builder();

    if let Ok(level) = std::env::var(LEVEL_ENV) {
        builder = builder.log_level_str(&level)?;
    }

    if let Ok(format) = std::env::var(FORMAT_ENV) {
        builder = builder.output_format(OutputFormat::parse(&format)?);
    }

    if let Ok(file_path) = std::env::var(FILE_ENV) {
        builder = builder.log_file(PathBuf::from(file_path));
    }

    Ok(builder.build())
}

/// Initialize tracing subscriber from environment variables
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(config_from_env()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = SubscriberConfig::builder().build();
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert!(config.enable_console);
        assert!(config.log_file.is_none());
        assert_eq!(config.filter_directive(), "kilocode=info");
    }

    #[test]
    fn rejects_unknown_level_and_format() {
        assert!(SubscriberConfig::builder().log_level_str("loud").is_err());
        assert!(OutputFormat::parse("xml").is_err());
        assert_eq!(OutputFormat::parse("JSON-COMPACT").unwrap(), OutputFormat::JsonCompact);
    }

    #[test]
    fn splits_log_path() {
        let (dir, file) = split_log_path(Path::new("logs/kilo.log")).unwrap();
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(file, PathBuf::from("kilo.log"));

        let (dir, _) = split_log_path(Path::new("kilo.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }

    #[test]
    fn test_init_subscriber() {
        let config = SubscriberConfig::builder().enable_console(false).build();
        let _result = init_subscriber(config);
    }
}
