// ABOUTME: Core data models for food lookup, serving input, and meal logging
// ABOUTME: Re-exports the nutrition model types used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Food records, serving specifications, logged entries, and meal buckets
pub mod nutrition;

pub use nutrition::{FoodRecord, LoggedFoodEntry, MealBucket, ServingSpec};
