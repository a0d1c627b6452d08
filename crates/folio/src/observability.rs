//! Tracing subscriber setup for the CLI and embedding applications.

use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log level filter used when `RUST_LOG` is unset (e.g., "info", "debug")
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
    /// Use `log_level` even when `RUST_LOG` is set
    pub override_env: bool,
}

impl ObservabilityConfig {
    /// Configuration honouring `RUST_LOG`, defaulting to `info`.
    pub fn new() -> Self {
        Self {
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
            override_env: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set a log level that wins over `RUST_LOG`.
    pub fn with_forced_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self.override_env = true;
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level unless the level
/// was forced with [`ObservabilityConfig::with_forced_log_level`]. Logs go to stderr
/// so command output on stdout stays machine readable.
///
/// # Errors
///
/// Fails when the level is not a valid filter or a global subscriber is
/// already installed.
pub fn init_observability(config: ObservabilityConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = env_filter(&config)?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    if config.override_env {
        return EnvFilter::try_new(&config.log_level);
    }
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))
}
