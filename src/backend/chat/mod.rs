//! Chat Module
//!
//! Message posting, the read-side query service and the HTTP handlers that
//! expose them together with the presence lifecycle.
//!
//! ```text
//! chat/
//! ├── mod.rs      - Module exports
//! ├── posting.rs  - MessageService (PostMessage)
//! ├── query.rs    - QueryService (ListParticipants, ListMessages)
//! └── handlers/   - axum handlers
//! ```

/// Message posting
pub mod posting;

/// Participant and message queries
pub mod query;

/// HTTP handlers
pub mod handlers;

pub use posting::MessageService;
pub use query::QueryService;
