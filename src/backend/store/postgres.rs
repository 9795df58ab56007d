/**
 * PostgreSQL Store
 *
 * This module persists participants and chat events to PostgreSQL.
 *
 * # Tables
 *
 * - `participants(name TEXT PRIMARY KEY, last_seen TIMESTAMPTZ)`
 * - `chat_events(id BIGSERIAL, sender, recipient, body, kind, sent_at)`
 *
 * The `BIGSERIAL` id defines log order. Schema creation lives in
 * `migrations/` and is applied by `backend::server::config::load_database`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{MessageLog, ParticipantStore, StoreError};
use crate::shared::{ChatEvent, EventKind, Participant};

/// Store backed by a PostgreSQL connection pool
///
/// The pool is owned by the caller; cloning the store clones the pool
/// handle, not the connections.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ParticipantRow {
    name: String,
    last_seen: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct EventRow {
    sender: String,
    recipient: String,
    body: String,
    kind: String,
    sent_at: String,
}

impl TryFrom<EventRow> for ChatEvent {
    type Error = StoreError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let kind: EventKind = row
            .kind
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("unknown event kind '{}'", row.kind)))?;
        Ok(ChatEvent {
            from: row.sender,
            to: row.recipient,
            text: row.body,
            kind,
            time: row.sent_at,
        })
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantStore for PgStore {
    async fn insert_if_absent(&self, participant: &Participant) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO participants (name, last_seen)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&participant.name)
        .bind(participant.last_seen)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find(&self, name: &str) -> Result<Option<Participant>, StoreError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            "SELECT name, last_seen FROM participants WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Participant::new(row.name, row.last_seen)))
    }

    async fn list(&self) -> Result<Vec<Participant>, StoreError> {
        let rows = sqlx::query_as::<_, ParticipantRow>("SELECT name, last_seen FROM participants")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Participant::new(row.name, row.last_seen))
            .collect())
    }

    async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM participants WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn touch(&self, name: &str, seen: DateTime<Utc>) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE participants SET last_seen = $2 WHERE name = $1")
            .bind(name)
            .bind(seen)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MessageLog for PgStore {
    async fn append(&self, event: &ChatEvent) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO chat_events (sender, recipient, body, kind, sent_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&event.from)
        .bind(&event.to)
        .bind(&event.text)
        .bind(event.kind.as_str())
        .bind(&event.time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn visible_to(
        &self,
        viewer: &str,
        broadcast: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ChatEvent>, StoreError> {
        // Newest first so LIMIT keeps the most recent rows; reversed below.
        // A NULL limit means no limit in PostgreSQL.
        let limit = limit.map(|limit| i64::try_from(limit).unwrap_or(i64::MAX));
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT sender, recipient, body, kind, sent_at
            FROM chat_events
            WHERE recipient = $1 OR sender = $1 OR recipient = $2
            ORDER BY id DESC
            LIMIT $3
            "#,
        )
        .bind(viewer)
        .bind(broadcast)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .rev()
            .map(ChatEvent::try_from)
            .collect()
    }
}
