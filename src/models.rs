// ABOUTME: Core data models for the calorie tracking client
// ABOUTME: Re-exports FoodRecord, ServingSpec, LoggedFoodEntry, and MealBucket from macro-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `FoodRecord`: a food as reported by the nutrition lookup
//! - `ServingSpec`: the amount and unit the user asked for
//! - `LoggedFoodEntry`: an attributed food filed under a meal
//! - `MealBucket`: breakfast, lunch, dinner, or snacks

pub use macro_core::models::{FoodRecord, LoggedFoodEntry, MealBucket, ServingSpec};
