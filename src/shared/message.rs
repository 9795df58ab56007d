/**
 * Chat Event Data Structure
 *
 * This module defines the `ChatEvent` record stored in the message log,
 * the `EventKind` discriminator and the request body used to post a
 * user-authored message.
 *
 * Events are immutable once created. The log never updates or deletes
 * them, so every constructor here produces a finished value.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Recipient value meaning "every participant in the room"
pub const BROADCAST_TARGET: &str = "Todos";

/// Status text appended when a participant joins
pub const JOINED_TEXT: &str = "joined the room";

/// Status text appended when a participant is evicted
pub const LEFT_TEXT: &str = "left the room";

/// Kind of chat event
///
/// Serialized in kebab-case so that the wire values are
/// `broadcast-message`, `direct-message` and `status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// Message addressed to the whole room
    BroadcastMessage,
    /// Message addressed to a single participant
    DirectMessage,
    /// System-authored join/leave notice
    Status,
}

impl EventKind {
    /// Wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BroadcastMessage => "broadcast-message",
            Self::DirectMessage => "direct-message",
            Self::Status => "status",
        }
    }

    /// Whether participants may post events of this kind
    pub fn is_user_authored(&self) -> bool {
        !matches!(self, Self::Status)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "broadcast-message" => Ok(Self::BroadcastMessage),
            "direct-message" => Ok(Self::DirectMessage),
            "status" => Ok(Self::Status),
            other => Err(SharedError::validation(
                "type",
                format!("unknown message type '{other}'"),
            )),
        }
    }
}

/// A single entry of the message log
///
/// # Fields
/// * `from` - Originating participant name
/// * `to` - Recipient name or [`BROADCAST_TARGET`]
/// * `text` - Message body
/// * `kind` - Event kind, serialized as `type`
/// * `time` - Creation time of day, `HH:MM:SS` in UTC
///
/// `from` is a weak reference: the participant may have been evicted since
/// the event was written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatEvent {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub time: String,
}

impl ChatEvent {
    /// Create a user-authored event stamped at `at`
    pub fn message(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: EventKind,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: format_time(at),
        }
    }

    /// Create a broadcast status notice for `name`
    pub fn status(name: impl Into<String>, text: &str, at: DateTime<Utc>) -> Self {
        Self::message(name, BROADCAST_TARGET, text, EventKind::Status, at)
    }

    /// Whether `viewer` is allowed to see this event
    ///
    /// An event is visible when it was sent by the viewer, addressed to the
    /// viewer, or addressed to the whole room.
    pub fn is_visible_to(&self, viewer: &str) -> bool {
        self.to == viewer || self.from == viewer || self.to == BROADCAST_TARGET
    }
}

/// Render an instant as the `HH:MM:SS` time of day used by events
pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Body of a `POST /messages` request
///
/// The sender is not part of the body; it comes from the `User` header.
/// `kind` stays a raw string so an unknown type is reported as a
/// validation error instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMessage {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}
