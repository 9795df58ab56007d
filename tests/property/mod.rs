//! Property-based tests

pub mod validation_proptest;
