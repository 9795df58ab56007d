/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding one cloneable service per concern:
 * - `PresenceManager` for joins and liveness refreshes
 * - `MessageService` for posting messages
 * - `QueryService` for participant and message listings
 *
 * All three share the same `Stores` handle and clock.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract the one
 * service they need without taking the entire `AppState`.
 *
 * ```rust,ignore
 * async fn handler(State(presence): State<PresenceManager>) {
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::chat::{MessageService, QueryService};
use crate::backend::clock::Clock;
use crate::backend::presence::PresenceManager;
use crate::backend::store::Stores;

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub presence: PresenceManager,
    pub messages: MessageService,
    pub query: QueryService,
}

impl AppState {
    /// Build every service over the same stores and clock
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self {
            presence: PresenceManager::new(stores.clone(), clock.clone()),
            messages: MessageService::new(stores.clone(), clock),
            query: QueryService::new(stores),
        }
    }
}

impl FromRef<AppState> for PresenceManager {
    fn from_ref(state: &AppState) -> Self {
        state.presence.clone()
    }
}

impl FromRef<AppState> for MessageService {
    fn from_ref(state: &AppState) -> Self {
        state.messages.clone()
    }
}

impl FromRef<AppState> for QueryService {
    fn from_ref(state: &AppState) -> Self {
        state.query.clone()
    }
}
