// ABOUTME: Main library entry point for the MacroTracker calorie tracking client
// ABOUTME: Wires configuration, logging, backend adapters, tracking state, and the session context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # MacroTracker
//!
//! A calorie tracking client: look up a food, convert the serving the user
//! asked for into the food's own serving unit, attribute calories, file them
//! under a meal, and report progress against a daily goal.
//!
//! ## Architecture
//!
//! - **`macro-core`**: errors, constants, and data models
//! - **`macro-intelligence`**: `UnitConverter` and `CalorieAttributor` (pure, no I/O)
//! - **External**: nutrition lookup, auth, and goal store behind traits, with
//!   HTTP adapters and in-memory doubles
//! - **Tracking**: `FoodLedger` and `GoalTracker`
//! - **Session**: the explicit session context that runs the search-and-log flow
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use macro_tracker::config::TrackerConfig;
//! use macro_tracker::errors::AppResult;
//! use macro_tracker::external::{InMemoryAuthService, InMemoryGoalStore, MockNutritionClient};
//! use macro_tracker::models::{MealBucket, ServingSpec};
//! use macro_tracker::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = TrackerConfig::from_env()?;
//!     let session = Session::new(
//!         &config,
//!         Arc::new(MockNutritionClient::new()),
//!         Arc::new(InMemoryAuthService::new()),
//!         Arc::new(InMemoryGoalStore::new()),
//!     );
//!
//!     let serving = ServingSpec::new(1.5, "cup")?;
//!     let outcome = session.search_and_log(MealBucket::Lunch, "cooked rice", &serving).await?;
//!     println!("{}", outcome.message);
//!     println!("{}", session.summary()?.status);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Unified error handling
pub mod errors;

/// Backend service clients and in-memory doubles
pub mod external;

/// Structured logging setup
pub mod logging;

/// Data models
pub mod models;

/// Session context orchestrating lookup, attribution, ledger, and goal
pub mod session;

/// Food ledger and goal tracking
pub mod tracking;

pub use macro_intelligence as intelligence;
