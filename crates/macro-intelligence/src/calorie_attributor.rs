// ABOUTME: Calorie attribution from a serving specification and a food record
// ABOUTME: Scales by the unit-normalized amount, or multiplies servings when no conversion applies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie Attributor
//!
//! Formula when the converter succeeds with normalized amount `n`:
//!
//! ```text
//! calories = round(n / serving_qty * calories_per_serving)
//! ```
//!
//! Otherwise (unknown unit, including the default "serving", or weight to
//! volume) the user amount is a direct multiplier on the record's calories:
//!
//! ```text
//! calories = round(amount * calories_per_serving)
//! ```
//!
//! Rounding is to the nearest integer with ties away from zero (`f64::round`).

use crate::unit_converter::{ConversionFailure, UnitConverter};
use macro_core::models::{FoodRecord, ServingSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Why the serving multiplier path was used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The converter could not express the serving in the food's unit
    Conversion {
        /// Converter outcome
        failure: ConversionFailure,
    },
    /// The food record's serving quantity is zero, negative, or not finite
    InvalidServingQuantity,
}

/// How the calorie value was derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributionMethod {
    /// Scaled by the amount normalized into the food's serving unit
    UnitScaled {
        /// Serving amount expressed in the food's serving unit
        normalized_amount: f64,
    },
    /// User amount multiplied by calories per serving
    ServingMultiplier {
        /// Why unit-aware scaling was not possible
        reason: FallbackReason,
    },
}

/// Calorie value attributed to one serving request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieAttribution {
    /// Rounded calories
    pub calories: u32,
    /// Path taken to compute them
    pub method: AttributionMethod,
}

/// Round raw calories to the nearest integer, ties away from zero
///
/// Negative and non-finite values clamp to 0; values beyond `u32::MAX` saturate.
#[must_use]
pub fn round_calories(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    let rounded = raw.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Combines the unit converter with the attribution formula
#[derive(Debug, Clone, Default)]
pub struct CalorieAttributor {
    converter: UnitConverter,
}

impl CalorieAttributor {
    /// Create an attributor around a configured converter
    #[must_use]
    pub const fn new(converter: UnitConverter) -> Self {
        Self { converter }
    }

    /// Converter used for normalization
    #[must_use]
    pub const fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    /// Attribute calories for `serving` of `food`
    #[must_use]
    pub fn attribute(&self, serving: &ServingSpec, food: &FoodRecord) -> CalorieAttribution {
        let fallback = |reason: FallbackReason| {
            let calories = round_calories(serving.amount * food.calories_per_serving);
            debug!(food = %food.name, calories, ?reason, "serving multiplier attribution");
            CalorieAttribution {
                calories,
                method: AttributionMethod::ServingMultiplier { reason },
            }
        };

        if !food.has_scalable_quantity() {
            return fallback(FallbackReason::InvalidServingQuantity);
        }

        match self.converter.normalize(
            serving.amount,
            &serving.unit,
            &food.serving_unit,
            Some(&food.name),
        ) {
            Ok(normalized_amount) => {
                let calories = round_calories(
                    normalized_amount / food.serving_qty * food.calories_per_serving,
                );
                debug!(
                    food = %food.name,
                    normalized_amount,
                    calories,
                    "unit-scaled attribution"
                );
                CalorieAttribution {
                    calories,
                    method: AttributionMethod::UnitScaled { normalized_amount },
                }
            }
            Err(failure) => fallback(FallbackReason::Conversion { failure }),
        }
    }
}
