//! Helm Values Sync Library
//!
//! Core functionality for the `helm-values-sync` CLI: kubectl invocation,
//! image tag extraction, and the values document read-modify-write.
//! Tests for pure functions live in the module files; filesystem behavior
//! is covered under `tests/`.

pub mod cli;
pub mod image;
pub mod kubectl;
pub mod sync;
pub mod values;
