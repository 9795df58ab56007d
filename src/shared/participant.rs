/**
 * Participant Data Structure
 *
 * A participant is a name currently present in the room together with the
 * instant of its last liveness signal (join or refresh).
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant present in the room
///
/// `last_seen` is serialized as `lastSeen` in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    #[serde(rename = "lastSeen", with = "chrono::serde::ts_milliseconds")]
    pub last_seen: DateTime<Utc>,
}

impl Participant {
    pub fn new(name: impl Into<String>, last_seen: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            last_seen,
        }
    }
}

/// Body of a `POST /participants` request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinRequest {
    pub name: String,
}
