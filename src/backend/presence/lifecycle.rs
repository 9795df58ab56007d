/**
 * Presence Lifecycle
 *
 * A participant is admitted by `join`, kept alive by `refresh` and removed
 * by `evict` once `is_stale` says it went silent for too long.
 *
 * # Write Ordering
 *
 * `join` writes the participant record before appending the "joined"
 * status event, and `evict` removes the record before appending "left".
 * A reader that sees a join notice can therefore always find the
 * participant in the list (until it is evicted). The two writes are not a
 * transaction: if the append fails after the insert, the participant stays
 * present without a notice and the error is reported to the caller.
 *
 * # Per-Name Locking
 *
 * `join` and `evict` hold an async lock keyed by participant name across
 * both of their writes, so the status events of one name always alternate
 * "joined", "left", "joined". Different names never contend. `refresh`
 * takes no lock. Lock entries are dropped from the map once nobody holds
 * or waits on them.
 */

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::backend::clock::Clock;
use crate::backend::error::BackendError;
use crate::backend::store::Stores;
use crate::shared::message::{JOINED_TEXT, LEFT_TEXT};
use crate::shared::validation::validate_name;
use crate::shared::{ChatEvent, Participant};

/// Whether `participant` has been silent for longer than `threshold` at `now`
///
/// Exactly `threshold` of silence is still considered alive.
pub fn is_stale(participant: &Participant, now: DateTime<Utc>, threshold: Duration) -> bool {
    let silence = now.signed_duration_since(participant.last_seen);
    match silence.to_std() {
        Ok(silence) => silence > threshold,
        // last_seen is in the future relative to `now`
        Err(_) => false,
    }
}

type NameLocks = DashMap<String, Arc<Mutex<()>>>;

/// Held lock on one participant name
struct NameGuard {
    locks: Arc<NameLocks>,
    name: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for NameGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map itself still references an idle lock
        self.locks
            .remove_if(&self.name, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Result of removing a participant
#[derive(Debug)]
pub enum Eviction {
    /// No participant with that name was present
    Absent,
    /// Removed and the "left" notice was written
    Announced,
    /// Removed, but writing the "left" notice failed
    Unannounced(BackendError),
}

/// Admits, refreshes and evicts participants
#[derive(Clone)]
pub struct PresenceManager {
    stores: Stores,
    clock: Arc<dyn Clock>,
    name_locks: Arc<NameLocks>,
}

impl PresenceManager {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self {
            stores,
            clock,
            name_locks: Arc::new(DashMap::new()),
        }
    }

    async fn lock_name(&self, name: &str) -> NameGuard {
        let lock = self.name_locks.entry(name.to_string()).or_default().value().clone();
        let guard = lock.lock_owned().await;
        NameGuard {
            locks: Arc::clone(&self.name_locks),
            name: name.to_string(),
            guard: Some(guard),
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Admit a new participant
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the name is shorter than 2 characters or numeric
    /// - `Conflict` if a participant with exactly this name is present
    /// - `Store` if either write fails
    ///
    /// Returns the stored participant record.
    pub async fn join(&self, raw_name: &str) -> Result<Participant, BackendError> {
        let name = validate_name(raw_name)?;
        let _guard = self.lock_name(&name).await;
        let now = self.clock.now();
        let participant = Participant::new(name, now);

        if !self.stores.insert_participant(&participant).await? {
            tracing::debug!("Join rejected, name '{}' is taken", participant.name);
            return Err(BackendError::conflict(participant.name));
        }

        self.stores
            .append_event(&ChatEvent::status(&participant.name, JOINED_TEXT, now))
            .await?;

        tracing::info!("Participant '{}' joined", participant.name);
        Ok(participant)
    }

    /// Record a liveness signal for a present participant
    ///
    /// Never re-creates an evicted participant.
    pub async fn refresh(&self, name: &str) -> Result<(), BackendError> {
        let name = name.trim();
        let now = self.clock.now();
        if self.stores.touch_participant(name, now).await? {
            tracing::trace!("Participant '{}' refreshed", name);
            Ok(())
        } else {
            Err(BackendError::not_found(name))
        }
    }

    /// Whether `name` is currently present
    pub async fn is_present(&self, name: &str) -> Result<bool, BackendError> {
        Ok(self.stores.find_participant(name).await?.is_some())
    }

    /// Remove a participant and announce its departure
    ///
    /// Returns `false` when the participant was already gone, in which
    /// case no status event is written. A failed notice is an error even
    /// though the participant was removed; use `evict_outcome` to tell
    /// the two apart.
    pub async fn evict(&self, name: &str) -> Result<bool, BackendError> {
        match self.evict_outcome(name).await? {
            Eviction::Absent => Ok(false),
            Eviction::Announced => Ok(true),
            Eviction::Unannounced(e) => Err(e),
        }
    }

    /// Remove a participant, reporting whether the notice was written
    ///
    /// # Errors
    ///
    /// `Store` only when the removal itself failed, i.e. the participant
    /// may still be present.
    pub async fn evict_outcome(&self, name: &str) -> Result<Eviction, BackendError> {
        let _guard = self.lock_name(name).await;

        if !self.stores.remove_participant(name).await? {
            return Ok(Eviction::Absent);
        }

        let now = self.clock.now();
        if let Err(e) = self
            .stores
            .append_event(&ChatEvent::status(name, LEFT_TEXT, now))
            .await
        {
            return Ok(Eviction::Unannounced(e.into()));
        }

        tracing::info!("Participant '{}' left", name);
        Ok(Eviction::Announced)
    }
}
