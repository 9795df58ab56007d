//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! └── chat_routes.rs  - Participant, message and status routes
//! ```

/// Main router creation
pub mod router;

/// Chat-related routes
pub mod chat_routes;

// Re-export commonly used functions
pub use router::create_router;
