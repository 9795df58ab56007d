/**
 * Server Initialization
 *
 * This module handles the initialization and teardown of the chat server,
 * including store selection, state creation, the eviction sweeper and
 * route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool
 * 2. Build the stores (PostgreSQL or in-memory)
 * 3. Create the application state
 * 4. Start the eviction sweeper
 * 5. Create the router
 *
 * # Shutdown
 *
 * `App::shutdown` stops the sweeper and closes the database pool. The
 * binary calls it after axum has drained in-flight requests.
 */

use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::clock::{Clock, SystemClock};
use crate::backend::presence::{EvictionSweeper, SweepSettings, SweeperHandle};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{build_stores, load_database};
use crate::backend::server::state::AppState;
use crate::backend::store::Stores;
use crate::shared::AppConfig;

/// A fully initialized server: router plus the resources it owns
pub struct App {
    pub router: Router<()>,
    pub state: AppState,
    sweeper: SweeperHandle,
    db_pool: Option<PgPool>,
}

impl App {
    /// Stop background work and release the database pool
    pub async fn shutdown(self) {
        tracing::info!("Shutting down chat server");
        self.sweeper.shutdown().await;
        if let Some(pool) = self.db_pool {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}

/// Create and configure the application
///
/// Must be called from within a Tokio runtime, since it spawns the
/// eviction sweeper.
pub async fn create_app(config: &AppConfig) -> App {
    tracing::info!("Initializing chat server");

    let db_pool = load_database(config).await;
    let stores = build_stores(config, db_pool.as_ref());

    create_app_with(config, stores, Arc::new(SystemClock), db_pool)
}

/// Assemble the application from already-built parts
pub fn create_app_with(
    config: &AppConfig,
    stores: Stores,
    clock: Arc<dyn Clock>,
    db_pool: Option<PgPool>,
) -> App {
    let state = AppState::new(stores, clock);

    let sweeper = EvictionSweeper::new(state.presence.clone(), SweepSettings::from(config)).spawn();

    let router = create_router(state.clone());
    tracing::info!("Router configured with eviction sweeper");

    App {
        router,
        state,
        sweeper,
        db_pool,
    }
}
