/**
 * Backend Error Types
 *
 * This module defines the error taxonomy surfaced by HTTP handlers.
 * Every variant maps to one HTTP status code and a human-readable message.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` / `BadRequest` - bad input shape or content (400)
 * - `AuthenticationFailed` - missing, invalid or expired token, bad login (401)
 * - `NotAuthenticated` - a protected route was called without credentials (401)
 * - `Forbidden` - authenticated but not allowed to perform the action (403)
 * - `NotFound` - referenced entity is absent (404)
 *
 * ## Server Errors
 *
 * - `Database` - sqlx failure (500)
 * - `Internal` - hashing, signing or other unexpected failures (500)
 *
 * Nothing is retried locally; every failure goes straight back to the caller.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::{FieldErrors, SharedError};

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum BackendError {
    /// Input failed validation (wraps per-field messages)
    #[error(transparent)]
    Shared(#[from] SharedError),

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Shared(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Shared(SharedError::SerializationError { .. }) => StatusCode::BAD_REQUEST,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::AuthenticationFailed { .. } | Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client
    ///
    /// Server-side failures get a generic message; the detail is logged.
    pub fn message(&self) -> String {
        match self {
            Self::Shared(SharedError::ValidationError { .. }) => "Validation failed.".to_string(),
            Self::Shared(err) => err.to_string(),
            Self::BadRequest { message }
            | Self::AuthenticationFailed { message }
            | Self::Forbidden { message }
            | Self::NotFound { message } => message.clone(),
            Self::NotAuthenticated => self.to_string(),
            Self::Database(_) | Self::Internal { .. } => "Internal server error.".to_string(),
        }
    }

    /// Per-field validation messages, if this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Shared(SharedError::ValidationError { errors }) => Some(errors),
            _ => None,
        }
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(format!("password hashing failed: {}", err))
    }
}
