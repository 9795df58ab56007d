//! Presence Module
//!
//! Liveness lifecycle of room participants.
//!
//! - **`lifecycle`** - join, refresh, evict and the staleness predicate
//! - **`sweeper`** - periodic task evicting stale participants

/// Join / refresh / evict
pub mod lifecycle;

/// Background eviction sweep
pub mod sweeper;

pub use lifecycle::{is_stale, Eviction, PresenceManager};
pub use sweeper::{EvictionSweeper, SweepReport, SweepSettings, SweeperHandle};
