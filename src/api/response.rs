//! Response bodies and the mapping from [`Error`] to HTTP responses

use crate::core::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::any::Any;
use tracing::error;

/// Message shown for every server-side failure
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error envelope: `{"error": {"message": ..., "details": [...]}}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorBody,
}

/// Inner error payload
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human readable summary
    pub message: String,
    /// Per-field violations or debug diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    /// Envelope without details
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                details: None,
            },
        }
    }

    /// Envelope with a details array
    pub fn with_details(message: impl Into<String>, details: Value) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

/// `{"message": ...}` body used for deletions
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Outcome message
    pub message: String,
}

impl MessageResponse {
    /// Create a message body
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"success": true}` body used by analytics counters
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always true
    pub success: bool,
}

impl SuccessResponse {
    /// Successful outcome
    pub fn ok() -> Self {
        Self { success: true }
    }
}

impl Error {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Config(_)
            | Error::Internal(_)
            | Error::Io(_)
            | Error::Token(_)
            | Error::PasswordHash(_)
            | Error::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Error::Validation(violations) => ErrorResponse::with_details(self.to_string(), json!(violations)),
            _ if self.is_server_error() => {
                error!("Request failed: {}", self);
                server_error_body(self.to_string())
            }
            _ => ErrorResponse::new(self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(server_error_body(format!("panic: {}", detail))),
    )
        .into_response()
}

// Diagnostics are only exposed by debug builds.
fn server_error_body(trace: String) -> ErrorResponse {
    if cfg!(debug_assertions) {
        ErrorResponse::with_details(SERVER_ERROR_MESSAGE, json!([{ "trace": trace }]))
    } else {
        ErrorResponse::new(SERVER_ERROR_MESSAGE)
    }
}
