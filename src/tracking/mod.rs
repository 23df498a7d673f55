// ABOUTME: Session-scoped calorie tracking state
// ABOUTME: FoodLedger for logged meals and GoalTracker for the daily goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily goal and derived values
pub mod goal;
/// Meal buckets and running total
pub mod ledger;

pub use goal::{fraction_consumed, remaining_calories, GoalPersistence, GoalTracker};
pub use ledger::{FoodLedger, LedgerSnapshot};
