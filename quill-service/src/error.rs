//! Service errors and their HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quill_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors raised by the service and its background jobs
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Request rejected before a job was created
    #[error("{0}")]
    BadRequest(String),

    /// Requested category is not one of the six allowed names
    #[error("Invalid category '{received}'. Must be one of: {}", allowed.join(", "))]
    InvalidCategory {
        received: String,
        allowed: Vec<&'static str>,
    },

    #[error("job not found")]
    JobNotFound,

    /// Generation, configuration or job storage failure
    #[error(transparent)]
    Core(#[from] quill_core::Error),

    /// Login or publish failure
    #[error(transparent)]
    Api(#[from] quill_api::Error),

    /// Listener could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(String),
}

impl ServiceError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) | ServiceError::InvalidCategory { .. } => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::JobNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidCategory { received, allowed } => {
                ServiceError::InvalidCategory { received, allowed }
            }
            other => ServiceError::Api(other.into()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ServiceError::InvalidCategory { received, allowed } => json!({
                "error": "Invalid category",
                "received": received,
                "allowed": allowed,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::BadRequest("topic is required".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::JobNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Server("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_category_converts() {
        let err: ServiceError = "Crypto".parse::<quill_core::Category>().unwrap_err().into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Crypto"));
    }

    #[test]
    fn test_missing_fields_become_api_validation() {
        let err: ServiceError = ValidationError::MissingFields(vec!["title_it"]).into();
        assert!(matches!(err, ServiceError::Api(_)));
        assert!(err.to_string().contains("title_it"));
    }
}
