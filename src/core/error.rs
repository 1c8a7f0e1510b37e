//! Error types and handling for the portfolio API
//!
//! Every failure the service can report is a variant of [`Error`]. The
//! mapping onto HTTP status codes and the JSON error envelope lives in
//! `api::response`, so the storage and auth layers stay transport-agnostic.

use serde::Serialize;
use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A single field that failed request validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: String,
    /// Human readable reason
    pub message: String,
}

impl FieldViolation {
    /// Create a violation for `field`
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main error type for the portfolio API
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record is absent from its collection
    #[error("{0}")]
    NotFound(String),

    /// Request body failed declared field constraints
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    /// Request body could not be read as the expected JSON shape
    #[error("{0}")]
    BadRequest(String),

    /// Missing, malformed or expired bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Valid token without the admin role
    #[error("Access denied. Admin privileges required.")]
    Forbidden,

    /// Unknown email or wrong password. Both cases share one message.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Caller supplied an id that is already taken
    #[error("{0}")]
    Conflict(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Token signing failures
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failures
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Prometheus metrics errors
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error from collected violations
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation(violations)
    }

    /// Create a malformed request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::Validation(_)
                | Error::BadRequest(_)
                | Error::Unauthorized(_)
                | Error::Forbidden
                | Error::InvalidCredentials
                | Error::Conflict(_)
        )
    }

    /// Check if this is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}
