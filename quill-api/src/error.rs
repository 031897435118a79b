//! Error types for identity and publishing calls

use quill_core::ValidationError;
use thiserror::Error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while logging in or publishing
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid local setup; no request was made
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Identity service rejected the credentials
    #[error("Login failed ({status}): {message}")]
    Authentication { status: u16, message: String },

    /// Publish endpoint rejected the token
    #[error("Unauthorized: {0}. Log in again to get a fresh token")]
    Unauthorized(String),

    /// Account lacks the role needed to publish
    #[error("Forbidden: {message}. Your role: {your_role}. Required: {required_role}")]
    Authorization {
        message: String,
        your_role: String,
        required_role: String,
    },

    /// Payload failed the local checks; no request was made
    #[error("Invalid article: {0}")]
    Validation(#[from] ValidationError),

    /// Site rejected the payload
    #[error("Bad request: {}", format_remote_validation(.message, .missing_fields))]
    RemoteValidation {
        message: String,
        missing_fields: Vec<String>,
    },

    /// No response received (timeout, DNS, connection refused)
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Any other non-success response
    #[error("API error {status}: {message}")]
    Remote { status: u16, message: String },

    /// Success status with a body we could not read
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

fn format_remote_validation(message: &str, missing_fields: &[String]) -> String {
    if missing_fields.is_empty() {
        message.to_string()
    } else {
        format!("{}. Missing fields: {}", message, missing_fields.join(", "))
    }
}

/// Coarse classification of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Authorization,
    Validation,
    Transport,
    Remote,
}

impl Error {
    /// Which kind of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Authentication { .. } | Error::Unauthorized(_) => ErrorKind::Authentication,
            Error::Authorization { .. } => ErrorKind::Authorization,
            Error::Validation(_) | Error::RemoteValidation { .. } => ErrorKind::Validation,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Remote { .. } | Error::Decode(_) => ErrorKind::Remote,
        }
    }

    /// HTTP status of the response, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. } | Error::Remote { status, .. } => Some(*status),
            Error::Unauthorized(_) => Some(401),
            Error::Authorization { .. } => Some(403),
            Error::RemoteValidation { .. } => Some(400),
            _ => None,
        }
    }

    /// Missing field names, local or remote
    pub fn missing_fields(&self) -> Vec<String> {
        match self {
            Error::Validation(ValidationError::MissingFields(fields)) => {
                fields.iter().map(|f| f.to_string()).collect()
            }
            Error::RemoteValidation { missing_fields, .. } => missing_fields.clone(),
            _ => Vec::new(),
        }
    }
}

impl From<quill_core::Error> for Error {
    fn from(err: quill_core::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}
