//! Integration tests driving the HTTP API and the PostgreSQL store

pub mod database;
pub mod presence_test;
