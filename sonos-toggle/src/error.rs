//! Error types for the toggle
//!
//! Per-speaker failures ([`ControlError`]) are downgraded to logged skips by
//! the callers; only [`ToggleError`] ends a run.

use std::path::PathBuf;
use thiserror::Error;

/// A single device call that did not succeed
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControlError {
    /// The speaker did not answer, or answered with something that is not a
    /// usable topology
    #[error("{address} unreachable: {reason}")]
    Unreachable { address: String, reason: String },

    /// The speaker answered but the command was rejected or failed
    #[error("{operation} failed on {speaker}: {reason}")]
    CommandFailed {
        speaker: String,
        operation: &'static str,
        reason: String,
    },
}

impl ControlError {
    pub fn unreachable(address: impl Into<String>, reason: impl ToString) -> Self {
        ControlError::Unreachable {
            address: address.into(),
            reason: reason.to_string(),
        }
    }

    pub fn command(speaker: impl Into<String>, operation: &'static str, reason: impl ToString) -> Self {
        ControlError::CommandFailed {
            speaker: speaker.into(),
            operation,
            reason: reason.to_string(),
        }
    }

    /// The underlying cause without the speaker prefix
    pub fn reason(&self) -> &str {
        match self {
            ControlError::Unreachable { reason, .. } => reason,
            ControlError::CommandFailed { reason, .. } => reason,
        }
    }
}

/// Conditions that abort a run
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ToggleError {
    #[error("no reachable speakers (excluded: {})", .excluded.join(", "))]
    NoReachableEndpoints { excluded: Vec<String> },

    #[error("could not determine group coordinator: {0}")]
    CoordinatorUndetermined(String),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
