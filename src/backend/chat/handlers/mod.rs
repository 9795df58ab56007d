//! Chat HTTP Handlers
//!
//! Thin axum handlers over the presence lifecycle, message posting and
//! query services. The sender identity of `/messages` and `/status`
//! requests is read from the `User` header.

use axum::http::HeaderMap;

/// `POST /participants`, `GET /participants`
pub mod participants;

/// `POST /messages`, `GET /messages`
pub mod messages;

/// `POST /status`
pub mod status;

pub use messages::{get_messages, post_message};
pub use participants::{get_participants, post_participant};
pub use status::post_status;

/// Header carrying the caller's participant name
pub const USER_HEADER: &str = "user";

/// Extract the caller identity from the `User` header
///
/// Returns `None` when the header is absent, not valid UTF-8, or blank.
pub fn user_identity(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
