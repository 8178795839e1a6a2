//! Error types and result aliases for tally operations.
//!
//! Display operations never hand these to the caller: a failed redraw is
//! logged and dropped. They surface from configuration parsing and from the
//! internal drawing routines.

use thiserror::Error;

/// Unified error type for tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for tally operations
pub type TallyResult<T> = Result<T, TallyError>;

impl TallyError {
    /// Create an IO error from std::io::Error
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration validation error
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
