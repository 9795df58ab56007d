/**
 * Message Handlers
 *
 * - `POST /messages` - post a broadcast or direct message (201)
 * - `GET /messages?limit=N` - messages visible to the caller
 *
 * Both routes require the `User` header; without it they answer 422.
 */

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use super::user_identity;
use crate::backend::chat::{MessageService, QueryService};
use crate::backend::error::BackendError;
use crate::shared::{ChatEvent, NewMessage};

/// Query string of `GET /messages`
///
/// `limit` is kept raw so a malformed value is reported as an invalid limit
/// rather than a generic query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<String>,
}

pub async fn post_message(
    State(messages): State<MessageService>,
    headers: HeaderMap,
    payload: Result<Json<NewMessage>, JsonRejection>,
) -> Result<StatusCode, BackendError> {
    let from = user_identity(&headers)
        .ok_or_else(|| BackendError::missing_identity(StatusCode::UNPROCESSABLE_ENTITY))?;
    let Json(message) = payload?;
    messages.post(&from, &message).await?;
    Ok(StatusCode::CREATED)
}

pub async fn get_messages(
    State(query): State<QueryService>,
    headers: HeaderMap,
    Query(params): Query<MessagesQuery>,
) -> Result<Json<Vec<ChatEvent>>, BackendError> {
    let viewer = user_identity(&headers)
        .ok_or_else(|| BackendError::missing_identity(StatusCode::UNPROCESSABLE_ENTITY))?;
    let events = query.list_messages(&viewer, params.limit.as_deref()).await?;
    Ok(Json(events))
}
