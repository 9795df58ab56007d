//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used by the chat services and HTTP handlers and can be
//! converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `InvalidInput` - Validation failures (including bad `limit` values)
//! - `Conflict` - Duplicate participant name
//! - `NotFound` - Refresh of an absent participant
//! - `SenderNotActive` - Posting without being present
//! - `MissingIdentity` - Request without a `User` header
//! - `Store` - Persistence failures and timeouts

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
