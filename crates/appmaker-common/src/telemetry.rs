//! Logging initialization
//!
//! appmaker has no long-running process to trace, so telemetry is limited to
//! structured logs on stderr:
//! - `RUST_LOG` style filtering through `EnvFilter`
//! - human-readable text or JSON lines, chosen by the host

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors that can occur during logging initialization
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Output format for log lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Initialize logging with the given configuration
///
/// Logs are written to stderr so rendered manifests on stdout stay clean.
///
/// # Example
///
/// ```ignore
/// use appmaker_common::telemetry::{init_logging, LogConfig};
///
/// init_logging(LogConfig::default())?;
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init(),
    };

    result.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_text_at_info() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.default_filter, "info");
    }

    #[test]
    fn second_initialization_reports_error() {
        // Only one global subscriber can be installed per process
        let _ = init_logging(LogConfig::default());
        let second = init_logging(LogConfig {
            format: LogFormat::Json,
            ..Default::default()
        });
        assert!(matches!(second, Err(TelemetryError::SubscriberInit(_))));
    }
}
