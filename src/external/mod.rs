// ABOUTME: External service clients (nutrition lookup, authentication, goal storage)
// ABOUTME: Trait seams with HTTP adapters over a shared client and in-memory doubles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External Service Clients
//!
//! The session talks to three collaborators through traits so the HTTP
//! adapters and the in-memory doubles are interchangeable. None of the
//! adapters retry.

/// Authentication service client
pub mod auth_client;
/// Calorie goal persistence
pub mod goal_store;
/// Shared pooled HTTP client
pub mod http_client;
/// Nutrition search and detail lookup
pub mod nutrition_client;

pub use auth_client::{AuthService, HttpAuthClient, InMemoryAuthService};
pub use goal_store::{GoalStore, HttpGoalStore, InMemoryGoalStore};
pub use http_client::{initialize_shared_client, shared_client};
pub use nutrition_client::{HttpNutritionClient, MockNutritionClient, NutritionProvider};
