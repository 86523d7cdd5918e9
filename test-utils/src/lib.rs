//! Test utilities for `semindex` integration testing
//!
//! This crate provides shared infrastructure for tests that exercise a
//! live Redis Stack:
//! - Deterministic embedders that avoid network calls
//! - Environment bootstrap (tracing, service URLs)

use std::env;

pub mod mock_embedder;

pub use mock_embedder::{MockEmbedder, StaticEmbedder};

/// Initialize test environment
///
/// Installs a tracing subscriber so test runs emit the same structured
/// logs the library emits in production. Safe to call from every test;
/// later calls are no-ops.
pub fn init_test_env() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,semindex=debug".to_string()),
        )
        .try_init();
}

/// Redis connection URL for integration tests
///
/// Reads `REDIS_URL`, defaulting to a local Redis Stack.
#[must_use]
pub fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}
