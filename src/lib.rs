//! Roomchat - Main Library
//!
//! Roomchat is a small real-time chat backend: participants join a shared
//! room, post broadcast or direct messages, poll for the messages visible
//! to them and are evicted automatically once they stop refreshing their
//! status.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between server and clients
//!   - Participant and chat event records
//!   - Request bodies and validation rules
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code
//!   - Presence lifecycle and eviction sweeper
//!   - Participant store and message log (in-memory or PostgreSQL)
//!   - Axum HTTP handlers and router
//!
//! # Usage
//!
//! ```rust,no_run
//! use roomchat::backend::server::create_app;
//! use roomchat::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app.router.clone()).await?;
//! app.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Presence Lifecycle
//!
//! - `POST /participants` admits a name and announces it with a status event
//! - `POST /status` resets the participant's eviction timer
//! - Every sweep interval, participants silent for longer than the stale
//!   threshold are removed and announced as having left
//!
//! # Thread Safety
//!
//! All services are cheap to clone and share one `Stores` handle. The
//! in-memory participant store is sharded per name, so concurrent requests
//! about different participants do not contend on a store-wide lock.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
