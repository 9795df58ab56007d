//! PostgreSQL store tests
//!
//! Every test works on its own participant names and broadcast target so
//! the suite can share one database.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use roomchat::backend::store::{MessageLog, ParticipantStore};
use roomchat::shared::{ChatEvent, EventKind, Participant};

use crate::common::database::TestDatabase;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap() + Duration::seconds(secs)
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_insert_if_absent_conflicts() {
    let db = TestDatabase::new(&["pg_insert_alice"]).await;
    let store = db.store();

    let first = Participant::new("pg_insert_alice", at(0));
    assert!(store.insert_if_absent(&first).await.unwrap());
    assert!(!store
        .insert_if_absent(&Participant::new("pg_insert_alice", at(5)))
        .await
        .unwrap());

    // The original record survives the rejected insert
    assert_eq!(store.find("pg_insert_alice").await.unwrap(), Some(first));
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_touch_and_remove() {
    let db = TestDatabase::new(&["pg_touch_bob", "pg_touch_ghost"]).await;
    let store = db.store();

    store
        .insert_if_absent(&Participant::new("pg_touch_bob", at(0)))
        .await
        .unwrap();

    assert!(store.touch("pg_touch_bob", at(8)).await.unwrap());
    assert_eq!(
        store.find("pg_touch_bob").await.unwrap().map(|p| p.last_seen),
        Some(at(8))
    );
    assert!(!store.touch("pg_touch_ghost", at(8)).await.unwrap());
    assert_eq!(store.find("pg_touch_ghost").await.unwrap(), None);

    assert!(store
        .list()
        .await
        .unwrap()
        .iter()
        .any(|p| p.name == "pg_touch_bob"));

    assert!(store.remove("pg_touch_bob").await.unwrap());
    assert!(!store.remove("pg_touch_bob").await.unwrap());
    assert_eq!(store.find("pg_touch_bob").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_visible_to_filters_and_keeps_most_recent() {
    let room = "pg_room_visible";
    let (alice, bob, carol) = ("pg_vis_alice", "pg_vis_bob", "pg_vis_carol");
    let db = TestDatabase::new(&[room, alice, bob, carol]).await;
    let store = db.store();

    let events = [
        ChatEvent::message(alice, room, "hello all", EventKind::BroadcastMessage, at(1)),
        ChatEvent::message(bob, carol, "psst carol", EventKind::DirectMessage, at(2)),
        ChatEvent::message(bob, alice, "hi alice", EventKind::DirectMessage, at(3)),
        ChatEvent::message(alice, carol, "from alice", EventKind::DirectMessage, at(4)),
        ChatEvent::message(carol, room, "bye all", EventKind::BroadcastMessage, at(5)),
    ];
    for event in &events {
        store.append(event).await.unwrap();
    }

    let texts = |events: Vec<ChatEvent>| -> Vec<String> {
        events.into_iter().map(|e| e.text).collect()
    };

    // Broadcasts, messages to Alice and messages from Alice; never bob→carol
    let all = store.visible_to(alice, room, None).await.unwrap();
    assert_eq!(
        texts(all),
        vec!["hello all", "hi alice", "from alice", "bye all"]
    );

    // Most recent two, still oldest first
    let recent = store.visible_to(alice, room, Some(2)).await.unwrap();
    assert_eq!(texts(recent), vec!["from alice", "bye all"]);

    let more_than_exist = store.visible_to(alice, room, Some(100)).await.unwrap();
    assert_eq!(more_than_exist.len(), 4);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_event_fields_survive_storage() {
    let room = "pg_room_fields";
    let db = TestDatabase::new(&[room, "pg_fields_dave"]).await;
    let store = db.store();

    let joined = ChatEvent::message("pg_fields_dave", room, "joined the room", EventKind::Status, at(37));
    store.append(&joined).await.unwrap();

    let stored = store.visible_to("pg_fields_dave", room, None).await.unwrap();
    assert_eq!(stored, vec![joined]);
    assert_eq!(stored[0].time, "20:00:37");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn test_unknown_kind_is_reported_corrupt() {
    let room = "pg_room_corrupt";
    let db = TestDatabase::new(&[room, "pg_corrupt_eve"]).await;

    sqlx::query(
        "INSERT INTO chat_events (sender, recipient, body, kind, sent_at) VALUES ($1, $2, 'x', 'shout', '10:00:00')",
    )
    .bind("pg_corrupt_eve")
    .bind(room)
    .execute(db.pool())
    .await
    .unwrap();

    let result = db.store().visible_to("pg_corrupt_eve", room, None).await;
    assert!(result.is_err());
}
