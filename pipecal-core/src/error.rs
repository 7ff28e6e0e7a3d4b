//! Error types for the pipecal engine.

use thiserror::Error;

/// Errors that can occur in pipecal operations.
#[derive(Error, Debug)]
pub enum PipecalError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Malformed event '{id}': {reason}")]
    MalformedEvent { id: String, reason: String },

    #[error("Invalid time range for event '{id}': {start} is not before {end}")]
    InvalidTimeRange {
        id: String,
        start: String,
        end: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipecalError {
    /// The one error string the host UI shows when a window fails to
    /// load. The host does not distinguish network, server, and parse
    /// failures.
    pub fn user_message(&self) -> &'static str {
        "Failed to load events"
    }
}

/// Result type alias for pipecal operations.
pub type PipecalResult<T> = Result<T, PipecalError>;
