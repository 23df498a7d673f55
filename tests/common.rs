// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, float tolerance helpers, and in-memory session wiring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `macro_tracker`

use macro_tracker::config::TrackerConfig;
use macro_tracker::external::{InMemoryAuthService, InMemoryGoalStore, MockNutritionClient};
use macro_tracker::session::Session;
use std::env;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Tolerance for floating-point comparisons
pub const EPSILON: f64 = 1e-9;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Assert two floats are equal within [`EPSILON`] scaled to their magnitude
pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = EPSILON * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

/// In-memory collaborators handed to a test session
pub struct TestBackend {
    pub nutrition: Arc<MockNutritionClient>,
    pub auth: Arc<InMemoryAuthService>,
    pub goals: Arc<InMemoryGoalStore>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self {
            nutrition: Arc::new(MockNutritionClient::new()),
            auth: Arc::new(InMemoryAuthService::new()),
            goals: Arc::new(InMemoryGoalStore::new()),
        }
    }

    /// Guest session over these collaborators with default configuration
    pub fn session(&self) -> Session {
        self.session_with(&TrackerConfig::default())
    }

    pub fn session_with(&self, config: &TrackerConfig) -> Session {
        init_test_logging();
        Session::new(
            config,
            self.nutrition.clone(),
            self.auth.clone(),
            self.goals.clone(),
        )
    }
}
