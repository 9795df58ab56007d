//! PostgreSQL store tests
//!
//! Require a reachable database; ignored unless run with `--ignored`.

pub mod migrations_test;
pub mod pg_store_test;
