//! Error types for the harness

use std::io;
use thiserror::Error;

/// Errors surfaced by the options parser and the engines
#[derive(Error, Debug)]
pub enum DryRunError {
    #[error("missing value for option '{flag}'")]
    MissingValue { flag: String },

    #[error("invalid value for option '{flag}': '{value}' is not an integer")]
    InvalidValue { flag: String, value: String },

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

impl DryRunError {
    /// Whether this error came from the argument vector rather than the output stream
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            DryRunError::MissingValue { .. } | DryRunError::InvalidValue { .. }
        )
    }
}

/// Result type for harness operations
pub type DryRunResult<T> = Result<T, DryRunError>;
