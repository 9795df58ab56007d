/**
 * Backend Error Types
 *
 * This module defines the errors returned by the presence lifecycle, the
 * message posting path and the query service. Every variant maps to one
 * HTTP status so handlers can return it directly.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * Detected before any state is mutated:
 * - Invalid field values or identities (422)
 * - Unparseable JSON bodies (400, 415 or 422, from the extractor)
 * - Invalid `limit` parameter (422)
 * - Duplicate participant name (409)
 * - Unknown participant on refresh (404)
 * - Posting without being present (422)
 *
 * ## Store Errors
 *
 * Persistence failures and timeouts. These are logged and reported as
 * 500; a multi-step operation interrupted by one is not rolled back.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request input failed validation
    #[error(transparent)]
    InvalidInput(#[from] SharedError),

    /// A participant with this name is already present
    #[error("participant '{name}' already exists")]
    Conflict { name: String },

    /// No participant with this name is present
    #[error("participant '{name}' not found")]
    NotFound { name: String },

    /// The sender is not a present participant
    #[error("sender '{name}' is not an active participant")]
    SenderNotActive { name: String },

    /// The request did not identify its sender
    #[error("missing User header")]
    MissingIdentity { status: StatusCode },

    /// The JSON body was missing, malformed or had the wrong content type
    #[error("malformed request body: {detail}")]
    MalformedBody { status: StatusCode, detail: String },

    /// The persistence layer failed or timed out
    #[error("transient store failure: {0}")]
    Store(#[from] StoreError),
}

impl BackendError {
    pub fn conflict(name: impl Into<String>) -> Self {
        Self::Conflict { name: name.into() }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn sender_not_active(name: impl Into<String>) -> Self {
        Self::SenderNotActive { name: name.into() }
    }

    /// Missing identity, reported with the status the route expects
    pub fn missing_identity(status: StatusCode) -> Self {
        Self::MissingIdentity { status }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `InvalidInput` - 422 Unprocessable Entity
    /// - `Conflict` - 409 Conflict
    /// - `NotFound` - 404 Not Found
    /// - `SenderNotActive` - 422 Unprocessable Entity
    /// - `MissingIdentity` - Uses the status code from the error
    /// - `MalformedBody` - Uses the status of the extractor rejection
    /// - `Store` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::SenderNotActive { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MissingIdentity { status } | Self::MalformedBody { status, .. } => *status,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    ///
    /// Store failures are not echoed to clients; their details only go
    /// to the log.
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) => "temporary storage failure, please retry".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}
