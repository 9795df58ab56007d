use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};

use super::user_identity;
use crate::backend::error::BackendError;
use crate::backend::presence::PresenceManager;

/// `POST /status`: liveness refresh for the participant named in `User`
///
/// Answers 404 when the header is missing or the participant is not present.
pub async fn post_status(
    State(presence): State<PresenceManager>,
    headers: HeaderMap,
) -> Result<StatusCode, BackendError> {
    let name = user_identity(&headers)
        .ok_or_else(|| BackendError::missing_identity(StatusCode::NOT_FOUND))?;
    presence.refresh(&name).await?;
    Ok(StatusCode::OK)
}
