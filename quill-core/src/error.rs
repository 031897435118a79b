//! Error types for Quill

use thiserror::Error;

/// Result type alias for Quill core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Quill core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (missing credentials, bad config file, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Article generator error
    #[error("Generator error: {0}")]
    Generator(String),

    /// Job store error
    #[error("Job error: {0}")]
    Job(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
