/**
 * In-Memory Store
 *
 * Participants live in a sharded `DashMap`, so an insert-if-absent or a
 * timestamp update only locks the shard holding that name. The message log
 * is a `Vec` behind a `tokio::sync::RwLock`: appends take the write lock for
 * a single push, readers share the lock.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::RwLock;

use super::{keep_most_recent, MessageLog, ParticipantStore, StoreError};
use crate::shared::{ChatEvent, Participant};

#[derive(Debug, Default)]
pub struct MemoryStore {
    participants: DashMap<String, Participant>,
    messages: RwLock<Vec<ChatEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn insert_if_absent(&self, participant: &Participant) -> Result<bool, StoreError> {
        match self.participants.entry(participant.name.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(participant.clone());
                Ok(true)
            }
        }
    }

    async fn find(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        Ok(self.participants.get(name).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Participant>, StoreError> {
        Ok(self
            .participants
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.participants.remove(name).is_some())
    }

    async fn touch(&self, name: &str, seen: DateTime<Utc>) -> Result<bool, StoreError> {
        match self.participants.get_mut(name) {
            Some(mut entry) => {
                entry.last_seen = seen;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl MessageLog for MemoryStore {
    async fn append(&self, event: &ChatEvent) -> Result<(), StoreError> {
        self.messages.write().await.push(event.clone());
        Ok(())
    }

    async fn visible_to(
        &self,
        viewer: &str,
        broadcast: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatEvent>, StoreError> {
        let messages = self.messages.read().await;
        let matching: Vec<ChatEvent> = messages
            .iter()
            .filter(|event| event.to == viewer || event.from == viewer || event.to == broadcast)
            .cloned()
            .collect();
        Ok(keep_most_recent(matching, limit))
    }
}
