//! Error handling for the HTTP layer.
//!
//! Handlers turn failures into an [`ApiError`] through an [`ErrorPolicy`],
//! which logs the failure once and fixes how it is reported. Every failure
//! produces exactly one response; nothing is re-raised.
//!
//! # Error modes
//!
//! - [`ErrorMode::Legacy`]: every failure on a single-customer route is a 404
//!   with [`NOT_FOUND_MESSAGE`]; list failures are a 500.
//! - [`ErrorMode::Strict`]: each failure class has its own status code.

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::customer::PayloadError;

/// Body of every legacy failure response and of strict not-found responses.
pub const NOT_FOUND_MESSAGE: &str = "The customer with the given ID was not found.";

const INTERNAL_MESSAGE: &str = "Internal server error";

/// How failures are reported to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Every single-customer failure is a 404 with the fixed message.
    #[default]
    Legacy,
    /// Not found, bad input, conflicts and store failures are told apart.
    Strict,
}

impl ErrorMode {
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl FromStr for ErrorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            other => Err(format!("expected 'legacy' or 'strict', got '{other}'")),
        }
    }
}

/// What kind of route produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Create, get, update, delete.
    Customer,
    /// List.
    Collection,
}

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found")]
    NotFound,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<PayloadError> for AppError {
    fn from(err: PayloadError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl AppError {
    /// Whether the failure was caused by the request rather than the store.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::Database(err) => err.is_client_error(),
            Self::NotFound | Self::BadRequest(_) => true,
        }
    }

    /// Status and body under the strict mapping.
    fn strict_parts(&self) -> (StatusCode, String) {
        match self {
            Self::NotFound | Self::Database(RepositoryError::NotFound) => {
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
            }
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Database(RepositoryError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {msg}"))
            }
            Self::Database(RepositoryError::Constraint(msg)) => {
                (StatusCode::CONFLICT, format!("Conflict: {msg}"))
            }
            Self::Database(RepositoryError::Unavailable(_)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service unavailable".to_string(),
            ),
            // Don't expose internal error details to clients
            Self::Database(RepositoryError::Database(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
            ),
        }
    }
}

/// Decides how failures of one handler are logged and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub mode: ErrorMode,
    pub scope: Scope,
}

impl ErrorPolicy {
    #[must_use]
    pub const fn new(mode: ErrorMode, scope: Scope) -> Self {
        Self { mode, scope }
    }

    /// Log a failure and wrap it for the response.
    pub fn reject(self, err: impl Into<AppError>) -> ApiError {
        let error = err.into();
        if error.is_client_error() {
            tracing::warn!(error = %error, mode = ?self.mode, "request rejected");
        } else {
            tracing::error!(error = %error, mode = ?self.mode, "store operation failed");
        }
        ApiError {
            policy: self,
            error,
        }
    }
}

/// A failure bound to the policy that reports it.
#[derive(Debug)]
pub struct ApiError {
    policy: ErrorPolicy,
    error: AppError,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, String) {
        match (self.policy.mode, self.policy.scope) {
            (ErrorMode::Legacy, Scope::Customer) => {
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
            }
            (ErrorMode::Legacy, Scope::Collection) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_MESSAGE.to_string(),
            ),
            (ErrorMode::Strict, _) => self.error.strict_parts(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.parts().into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
