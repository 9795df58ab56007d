//! Store Module
//!
//! Persistence seams of the chat server. The presence lifecycle, the
//! sweeper and the query service only talk to the two traits defined here,
//! so the backing engine can be swapped without touching them.
//!
//! # Architecture
//!
//! - **`ParticipantStore`** - name → last liveness instant
//! - **`MessageLog`** - append-only, creation-ordered chat events
//! - **`Stores`** - cloneable handle bundling both with a per-call timeout
//!
//! # Implementations
//!
//! - **`memory`** - in-process store, used when no database is configured
//! - **`postgres`** - PostgreSQL store built on `sqlx`
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Traits, StoreError and the Stores handle
//! ├── memory.rs   - In-memory implementation
//! └── postgres.rs - PostgreSQL implementation
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::shared::{ChatEvent, Participant};

/// In-memory store
pub mod memory;

/// PostgreSQL store
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failures of the persistence layer
///
/// All of these are transient from the caller's point of view: the
/// request can be retried and no validation rule was violated.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The call did not complete within the configured timeout
    #[error("store call '{operation}' timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// The database reported an error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be decoded
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Mapping of participant name to last liveness instant
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Insert the participant unless the name is taken
    ///
    /// Returns `false` when a participant with the same name already
    /// exists. The check and the insert happen as one step.
    async fn insert_if_absent(&self, participant: &Participant) -> Result<bool, StoreError>;

    /// Look a participant up by exact name
    async fn find(&self, name: &str) -> Result<Option<Participant>, StoreError>;

    /// Snapshot of every participant, in store iteration order
    async fn list(&self) -> Result<Vec<Participant>, StoreError>;

    /// Delete a participant, returning whether one was removed
    async fn remove(&self, name: &str) -> Result<bool, StoreError>;

    /// Update `last_seen`, returning whether the participant exists
    async fn touch(&self, name: &str, seen: DateTime<Utc>) -> Result<bool, StoreError>;
}

/// Append-only log of chat events
#[async_trait]
pub trait MessageLog: Send + Sync {
    async fn append(&self, event: &ChatEvent) -> Result<(), StoreError>;

    /// Events sent by or addressed to `viewer`, or addressed to `broadcast`
    ///
    /// Results are in creation order. With a limit, only the most recent
    /// `limit` matching events are returned (still oldest first).
    async fn visible_to(
        &self,
        viewer: &str,
        broadcast: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatEvent>, StoreError>;
}

/// Shared handle to the participant store and message log
///
/// Every call is bounded by `timeout`; an expired call becomes
/// [`StoreError::Timeout`].
#[derive(Clone)]
pub struct Stores {
    participants: Arc<dyn ParticipantStore>,
    messages: Arc<dyn MessageLog>,
    timeout: Duration,
}

impl Stores {
    pub fn new(
        participants: Arc<dyn ParticipantStore>,
        messages: Arc<dyn MessageLog>,
        timeout: Duration,
    ) -> Self {
        Self {
            participants,
            messages,
            timeout,
        }
    }

    /// Build a handle over a single in-memory store
    pub fn in_memory(timeout: Duration) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, timeout)
    }

    pub async fn insert_participant(&self, participant: &Participant) -> Result<bool, StoreError> {
        self.bounded("insert_participant", self.participants.insert_if_absent(participant))
            .await
    }

    pub async fn find_participant(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        self.bounded("find_participant", self.participants.find(name)).await
    }

    pub async fn list_participants(&self) -> Result<Vec<Participant>, StoreError> {
        self.bounded("list_participants", self.participants.list()).await
    }

    pub async fn remove_participant(&self, name: &str) -> Result<bool, StoreError> {
        self.bounded("remove_participant", self.participants.remove(name)).await
    }

    pub async fn touch_participant(&self, name: &str, seen: DateTime<Utc>) -> Result<bool, StoreError> {
        self.bounded("touch_participant", self.participants.touch(name, seen))
            .await
    }

    pub async fn append_event(&self, event: &ChatEvent) -> Result<(), StoreError> {
        self.bounded("append_event", self.messages.append(event)).await
    }

    pub async fn events_visible_to(
        &self,
        viewer: &str,
        broadcast: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatEvent>, StoreError> {
        self.bounded("events_visible_to", self.messages.visible_to(viewer, broadcast, limit))
            .await
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                operation,
                timeout: self.timeout,
            }),
        }
    }
}

/// Keep the last `limit` entries of an ordered list
pub(crate) fn keep_most_recent<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        if items.len() > limit {
            items.drain(..items.len() - limit);
        }
    }
    items
}
