//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-memory application with a manual clock
//! - Request builders for the chat API
//! - Response decoding
//! - PostgreSQL fixtures (`database`)

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use roomchat::backend::clock::ManualClock;
use roomchat::backend::routes::create_router;
use roomchat::backend::server::AppState;
use roomchat::backend::store::Stores;

pub mod database;

/// Instant every test clock starts at
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 20, 4, 37).unwrap()
}

/// Router over an in-memory store, without a background sweeper
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(test_epoch()));
        let state = AppState::new(Stores::in_memory(Duration::from_secs(1)), clock.clone());
        Self {
            router: create_router(state.clone()),
            state,
            clock,
        }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn join(&self, name: &str) -> StatusCode {
        self.send(request(Method::POST, "/participants", None, Some(serde_json::json!({ "name": name }))))
            .await
            .0
    }

    pub async fn post_message(&self, from: &str, to: &str, text: &str, kind: &str) -> StatusCode {
        let body = serde_json::json!({ "to": to, "text": text, "type": kind });
        self.send(request(Method::POST, "/messages", Some(from), Some(body)))
            .await
            .0
    }

    pub async fn refresh(&self, name: &str) -> StatusCode {
        self.send(request(Method::POST, "/status", Some(name), None)).await.0
    }

    pub async fn messages(&self, viewer: &str, limit: Option<&str>) -> (StatusCode, Value) {
        let uri = match limit {
            Some(limit) => format!("/messages?limit={limit}"),
            None => "/messages".to_string(),
        };
        self.send(request(Method::GET, &uri, Some(viewer), None)).await
    }

    pub async fn participant_names(&self) -> Vec<String> {
        let (status, body) = self.send(request(Method::GET, "/participants", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let mut names: Vec<String> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a request with an optional `User` header and JSON body
pub fn request(method: Method, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("User", user);
    }
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
