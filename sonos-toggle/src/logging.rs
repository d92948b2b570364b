//! Logging setup for the toggle binary
//!
//! All log output goes to stderr; stdout carries only the JSON summary.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// How much the binary says while it works
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber at all
    Silent,
    /// Compact stderr lines
    Development,
    /// Verbose output with source locations
    Debug,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

impl LoggingMode {
    /// Pick a mode from the command line flags
    pub fn from_flags(quiet: bool, level: &str) -> Self {
        if quiet {
            LoggingMode::Silent
        } else if matches!(level.to_lowercase().as_str(), "debug" | "trace") {
            LoggingMode::Debug
        } else {
            LoggingMode::Development
        }
    }
}

/// Install the subscriber for `mode`
///
/// # Environment Variables
///
/// - `SONOS_TOGGLE_LOG_LEVEL`: filter directive, wins over everything
/// - `RUST_LOG`: used when the above is unset
///
/// `default_level` applies when neither is set.
pub fn init_logging(mode: LoggingMode, default_level: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false)
                        .compact(),
                )
                .with(create_env_filter(default_level));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let subscriber = Registry::default()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .pretty()
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(create_env_filter(default_level));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

fn create_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("SONOS_TOGGLE_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}
