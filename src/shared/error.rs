//! Shared Error Types
//!
//! This module defines the validation errors raised while checking request
//! input. They are produced before any state is touched, so a request that
//! fails here never leaves a partial write behind.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field of a request body failed its schema rule
//! - `InvalidLimit` - The `limit` query parameter is not a positive integer
//!
//! # Usage
//!
//! ```rust
//! use roomchat::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "must be at least 2 characters");
//! ```
use thiserror::Error;

/// Validation failures shared by every request path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The message limit was not a positive integer
    #[error("Invalid limit '{value}': must be a positive integer")]
    InvalidLimit {
        /// The raw value supplied by the caller
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid limit error
    pub fn invalid_limit(value: impl Into<String>) -> Self {
        Self::InvalidLimit {
            value: value.into(),
        }
    }
}
