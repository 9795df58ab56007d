/**
 * Chat Route Configuration
 *
 * # Routes
 *
 * - `POST /participants` - Join the room
 * - `GET /participants` - List present participants
 * - `POST /messages` - Post a message (`User` header)
 * - `GET /messages` - Messages visible to the caller (`User` header)
 * - `POST /status` - Liveness refresh (`User` header)
 */

use axum::routing::{get, post};
use axum::Router;

use crate::backend::chat::handlers::{
    get_messages, get_participants, post_message, post_participant, post_status,
};
use crate::backend::server::state::AppState;

/// Add the chat routes to `router`
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/participants",
            post(post_participant).get(get_participants),
        )
        .route("/messages", post(post_message).get(get_messages))
        .route("/status", post(post_status))
}
