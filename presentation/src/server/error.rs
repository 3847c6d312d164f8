//! API error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use peer_review_domain::ReviewError;
use thiserror::Error;

/// Message for a body that is not JSON with a string `prompt`
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body. Send JSON with a `prompt` string.";

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API error with HTTP status code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{status}] {message}")]
pub struct ApiError {
    pub status: StatusCode,
    /// User-facing message, sent as `{ "error": message }`
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 400 for an unparseable body
    pub fn invalid_body() -> Self {
        Self::bad_request(INVALID_BODY_MESSAGE)
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Validation failures are the caller's fault; everything else is a 500.
impl From<ReviewError> for ApiError {
    fn from(error: ReviewError) -> Self {
        if error.is_validation() {
            Self::bad_request(error.user_message())
        } else {
            Self::internal(error.user_message())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

/// Failure to start or run the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
