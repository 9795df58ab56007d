/**
 * Server Configuration
 *
 * This module turns an `AppConfig` into the store the server runs on,
 * focusing on the optional PostgreSQL connection.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. When the
 * database is unset or unreachable, the server falls back to the in-memory
 * store.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::store::{PgStore, Stores};
use crate::shared::AppConfig;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads the database URL from the configuration
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is successfully configured
/// - `None` if no URL is configured, the connection fails or the
///   migrations fail
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .acquire_timeout(config.store_timeout)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Using the in-memory store.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Using the in-memory store.");
        pool.close().await;
        return None;
    }
    tracing::info!("Database migrations completed successfully");

    Some(pool)
}

/// Build the store handle for the configured backend
pub fn build_stores(config: &AppConfig, pool: Option<&PgPool>) -> Stores {
    match pool {
        Some(pool) => {
            let store = Arc::new(PgStore::new(pool.clone()));
            Stores::new(store.clone(), store, config.store_timeout)
        }
        None => Stores::in_memory(config.store_timeout),
    }
}
