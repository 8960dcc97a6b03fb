//! Error types for Pitwall
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Pitwall
#[derive(Debug, Error)]
pub enum PitwallError {
    /// Malformed or out-of-range year
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network/transport failure talking to the data source
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Source markup did not match the expected structure
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PitwallError {
    /// Short taxonomy tag used in error payloads and logs
    pub fn kind(&self) -> &'static str {
        match self {
            PitwallError::Validation(_) => "ValidationError",
            PitwallError::Fetch(_) => "FetchError",
            PitwallError::Parse(_) => "ParseError",
            PitwallError::Io(_) => "IoError",
            PitwallError::Json(_) => "JsonError",
        }
    }
}

/// Result type alias for Pitwall operations
pub type Result<T> = std::result::Result<T, PitwallError>;
