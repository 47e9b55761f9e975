//! Shared Error Types
//!
//! Errors that do not depend on the HTTP layer: input validation and
//! (de)serialization failures. The backend wraps these in `ApiError`.
//!
//! # Error Categories
//!
//! - `ValidationError` - one or more fields failed validation
//! - `SerializationError` - JSON serialization/deserialization failures
//!
//! # Usage
//!
//! ```rust
//! use profiles_api::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Enter a valid email address.");
//! assert!(error.to_string().contains("email"));
//! ```
use std::collections::BTreeMap;

use thiserror::Error;

/// Validation messages keyed by field name
///
/// A `BTreeMap` keeps the rendered JSON in a stable order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors that can occur outside of any particular transport
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// One or more fields failed validation
    #[error("Validation error: {}", describe(.errors))]
    ValidationError {
        /// Messages per offending field
        errors: FieldErrors,
    },
}

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        Self::ValidationError { errors }
    }

    /// Wrap an already collected set of field errors
    pub fn validation_errors(errors: FieldErrors) -> Self {
        Self::ValidationError { errors }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
