// ABOUTME: Nutrition tracking models for food lookup and calorie logging
// ABOUTME: FoodRecord, ServingSpec, LoggedFoodEntry, and MealBucket definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::nutrition::{DEFAULT_SERVING_AMOUNT, DEFAULT_SERVING_UNIT};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meal a logged food is filed under
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum MealBucket {
    /// Breakfast meal
    #[default]
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snacks between meals
    Snacks,
}

impl MealBucket {
    /// All buckets in display order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    /// Lowercase key used in messages and on the wire
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snacks => "snacks",
        }
    }

    /// Title-case label for headings
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }

    /// Position of this bucket in [`MealBucket::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Breakfast => 0,
            Self::Lunch => 1,
            Self::Dinner => 2,
            Self::Snacks => 3,
        }
    }
}

impl fmt::Display for MealBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MealBucket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snacks" | "snack" => Ok(Self::Snacks),
            other => Err(AppError::invalid_input(format!(
                "Unknown meal '{other}' (expected breakfast, lunch, dinner, or snacks)"
            ))),
        }
    }
}

/// Food as reported by the nutrition lookup
///
/// `calories_per_serving` applies to `serving_qty` of `serving_unit`, e.g.
/// 206 kcal for 1 cup of cooked rice or 165 kcal for 100 g of chicken breast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Food name as returned by the lookup
    pub name: String,
    /// Quantity of `serving_unit` the calories refer to
    pub serving_qty: f64,
    /// Native serving unit (weight, volume, or something like "medium")
    pub serving_unit: String,
    /// Calories for `serving_qty` of `serving_unit`
    pub calories_per_serving: f64,
}

impl FoodRecord {
    /// Build a food record
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is blank or the calories are negative or not finite
    pub fn new(
        name: impl Into<String>,
        serving_qty: f64,
        serving_unit: impl Into<String>,
        calories_per_serving: f64,
    ) -> AppResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::invalid_input("Food name cannot be empty"));
        }
        if !calories_per_serving.is_finite() || calories_per_serving < 0.0 {
            return Err(AppError::invalid_input(format!(
                "Calories for {name} must be a non-negative number"
            )));
        }

        Ok(Self {
            name,
            serving_qty,
            serving_unit: serving_unit.into(),
            calories_per_serving,
        })
    }

    /// Whether `serving_qty` can be used as a divisor for unit-aware scaling
    #[must_use]
    pub fn has_scalable_quantity(&self) -> bool {
        self.serving_qty.is_finite() && self.serving_qty > 0.0
    }
}

/// Serving amount and unit entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingSpec {
    /// Amount of `unit`
    pub amount: f64,
    /// Unit symbol as typed or selected ("serving", "grams", "cup", ...)
    pub unit: String,
}

impl ServingSpec {
    /// Build a serving specification
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the amount is negative or not finite, or the unit is blank
    pub fn new(amount: f64, unit: impl Into<String>) -> AppResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::invalid_input(
                "Serving amount must be a non-negative number",
            ));
        }
        let unit = unit.into();
        if unit.trim().is_empty() {
            return Err(AppError::invalid_input("Serving unit cannot be empty"));
        }
        Ok(Self { amount, unit })
    }

    /// Text shown next to a logged food, e.g. "1.5 cup"
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.amount, self.unit)
    }
}

impl Default for ServingSpec {
    fn default() -> Self {
        Self {
            amount: DEFAULT_SERVING_AMOUNT,
            unit: DEFAULT_SERVING_UNIT.to_owned(),
        }
    }
}

/// A food that has been attributed and logged to a meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedFoodEntry {
    /// Food name
    pub name: String,
    /// Attributed calories
    pub calories: u32,
    /// Serving the user asked for, as displayed
    pub serving: String,
    /// When the entry was created
    pub logged_at: DateTime<Utc>,
}

impl LoggedFoodEntry {
    /// Create an entry stamped with the current time
    #[must_use]
    pub fn new(name: impl Into<String>, calories: u32, serving: &ServingSpec) -> Self {
        Self {
            name: name.into(),
            calories,
            serving: serving.display(),
            logged_at: Utc::now(),
        }
    }
}
