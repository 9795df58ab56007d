//! Read side of the chat: participant listing and per-viewer message feeds.

use crate::backend::error::BackendError;
use crate::backend::store::Stores;
use crate::shared::message::BROADCAST_TARGET;
use crate::shared::validation::{parse_limit, validate_sender};
use crate::shared::{ChatEvent, Participant};

#[derive(Clone)]
pub struct QueryService {
    stores: Stores,
}

impl QueryService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// All present participants, in store order
    pub async fn list_participants(&self) -> Result<Vec<Participant>, BackendError> {
        Ok(self.stores.list_participants().await?)
    }

    /// Events `viewer` may see, oldest first
    ///
    /// `limit` is the raw query value; when present it must be a positive
    /// integer and only the most recent `limit` events are returned.
    pub async fn list_messages(
        &self,
        viewer: &str,
        limit: Option<&str>,
    ) -> Result<Vec<ChatEvent>, BackendError> {
        let limit = parse_limit(limit)?;
        let viewer = validate_sender(viewer)?;
        Ok(self
            .stores
            .events_visible_to(&viewer, BROADCAST_TARGET, limit)
            .await?)
    }
}
