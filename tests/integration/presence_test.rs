//! Presence lifecycle integration tests
//!
//! Refresh, eviction sweeps and the running sweeper task

use axum::http::{Method, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use roomchat::backend::clock::ManualClock;
use roomchat::backend::presence::{EvictionSweeper, SweepSettings};
use roomchat::backend::server::create_app_with;
use roomchat::backend::store::Stores;
use roomchat::shared::AppConfig;

use crate::common::{request, test_epoch, TestApp};

fn sweeper(app: &TestApp) -> EvictionSweeper {
    EvictionSweeper::new(app.state.presence.clone(), SweepSettings::default())
}

#[tokio::test]
async fn test_refresh_is_idempotent() {
    let app = TestApp::new();
    app.join("Alice").await;
    for _ in 0..5 {
        assert_eq!(app.refresh("Alice").await, StatusCode::OK);
    }
    assert_eq!(app.participant_names().await, vec!["Alice".to_string()]);
}

#[tokio::test]
async fn test_refresh_unknown_or_anonymous() {
    let app = TestApp::new();
    assert_eq!(app.refresh("Ghost").await, StatusCode::NOT_FOUND);

    let (status, _) = app.send(request(Method::POST, "/status", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.participant_names().await.is_empty());
}

#[tokio::test]
async fn test_sweep_evicts_only_stale() {
    let app = TestApp::new();
    app.join("Bob").await;
    app.clock.advance(Duration::from_secs(6));
    app.join("Carol").await;
    app.clock.advance(Duration::from_secs(5));

    // Bob silent for 11s, Carol for 5s
    let report = sweeper(&app).run_once().await.unwrap();
    assert_eq!(report.evicted, vec!["Bob".to_string()]);
    assert_eq!(app.participant_names().await, vec!["Carol".to_string()]);

    let (_, body) = app.messages("Carol", None).await;
    let last = body.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["from"], "Bob");
    assert_eq!(last["to"], "Todos");
    assert_eq!(last["text"], "left the room");
    assert_eq!(last["type"], "status");
}

#[tokio::test]
async fn test_evicted_participant_cannot_post_or_refresh() {
    let app = TestApp::new();
    app.join("Bob").await;
    app.clock.advance(Duration::from_secs(11));
    sweeper(&app).run_once().await.unwrap();

    assert_eq!(app.refresh("Bob").await, StatusCode::NOT_FOUND);
    assert_eq!(
        app.post_message("Bob", "Todos", "still here?", "broadcast-message").await,
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(app.join("Bob").await, StatusCode::CREATED);
}

#[tokio::test(start_paused = true)]
async fn test_app_sweeper_runs_in_background() {
    let config = AppConfig::default();
    let clock = Arc::new(ManualClock::new(test_epoch()));
    let app = create_app_with(
        &config,
        Stores::in_memory(config.store_timeout),
        clock.clone(),
        None,
    );

    app.state.presence.join("Bob").await.unwrap();
    app.state.presence.join("Carol").await.unwrap();
    clock.advance(Duration::from_secs(8));
    app.state.presence.refresh("Carol").await.unwrap();
    clock.advance(Duration::from_secs(4));

    tokio::time::sleep(config.sweep_interval + Duration::from_secs(1)).await;

    let names: Vec<String> = app
        .state
        .query
        .list_participants()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Carol".to_string()]);

    app.shutdown().await;
}
