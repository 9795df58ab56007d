/**
 * Participant Handlers
 *
 * - `POST /participants` - join the room (201, no body)
 * - `GET /participants` - list present participants
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::backend::chat::QueryService;
use crate::backend::error::BackendError;
use crate::backend::presence::PresenceManager;
use crate::shared::{JoinRequest, Participant};

/// Join the room
///
/// Returns 201 on success, 422 for an invalid name and 409 when the name is
/// already taken. A body that is not a JSON object with a `name` is
/// rejected with the usual error body.
pub async fn post_participant(
    State(presence): State<PresenceManager>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<StatusCode, BackendError> {
    let Json(request) = payload?;
    presence.join(&request.name).await?;
    Ok(StatusCode::CREATED)
}

/// List present participants
pub async fn get_participants(
    State(query): State<QueryService>,
) -> Result<Json<Vec<Participant>>, BackendError> {
    Ok(Json(query.list_participants().await?))
}
