//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use core_kernel::PortError;

/// Message sent with every 500 response
pub const PROCESSING_FAILED: &str = "Error processing request";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    /// An upstream answer relayed with its own status and body
    #[error("Upstream returned status {status}")]
    Upstream { status: u16, body: Value },

    /// Anything else that went wrong while handling the request
    #[error("Error processing request: {0}")]
    Processing(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found".to_string(), msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request".to_string(), msg),
            ApiError::MethodNotAllowed(msg) => {
                (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed".to_string(), msg)
            }
            ApiError::Upstream { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                warn!(status = status.as_u16(), "Relaying upstream error");
                return (status, Json(body)).into_response();
            }
            ApiError::Processing(detail) => {
                error!(error = %detail, "Request processing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, detail, PROCESSING_FAILED.to_string())
            }
        };

        let body = ErrorResponse {
            error: error_type,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Upstream { status, body, .. } => ApiError::Upstream { status, body },
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { message, .. } => ApiError::BadRequest(message),
            other => ApiError::Processing(other.to_string()),
        }
    }
}
