//! Backend Module
//!
//! Server-side code of the chat room: presence lifecycle, eviction sweeper,
//! message log, query service and the Axum HTTP layer around them.
//!
//! # Module Structure
//!
//! - **`clock`** - Time source used for every timestamp
//! - **`store`** - Participant store and message log traits and backends
//! - **`presence`** - Join / refresh / evict and the eviction sweeper
//! - **`chat`** - Message posting, queries and HTTP handlers
//! - **`routes`** - Router assembly
//! - **`server`** - State, configuration and initialization
//! - **`error`** - Backend error type and HTTP conversion

/// Time source
pub mod clock;

/// Persistence
pub mod store;

/// Presence lifecycle
pub mod presence;

/// Chat services and handlers
pub mod chat;

/// Route configuration
pub mod routes;

/// Server setup
pub mod server;

/// Error types
pub mod error;

pub use error::BackendError;
