//! Web Error Types
//!
//! Error types for the HTTP layer and their conversion to JSON responses
//! with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// HTTP layer error types
#[derive(Error, Debug)]
pub enum WebError {
    /// Malformed request parameter
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (unknown state, no states to show)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The dataset failed to load at startup
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl WebError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            WebError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            WebError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            WebError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE")
            }
            WebError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            WebError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Request failed"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for HTTP handlers
pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = WebError::BadRequest("scene index 'x'".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = WebError::NotFound("state 'Atlantis'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = WebError::ServiceUnavailable("missing column".into()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy");
        assert_eq!(
            WebError::from(io).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
