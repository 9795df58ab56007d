//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types are serialized as JSON on the
//! HTTP API.
//!
//! # Overview
//!
//! The shared module provides transport-agnostic types: the participant and
//! chat event records, request bodies, the validation rules applied to them
//! and the configuration of the server.

/// Participant data structure
pub mod participant;

/// Chat event data structure
pub mod message;

/// Request validation
pub mod validation;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use participant::{JoinRequest, Participant};
pub use message::{ChatEvent, EventKind, NewMessage, BROADCAST_TARGET};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
