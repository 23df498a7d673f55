// ABOUTME: Serving-unit normalization between weight and volume unit families
// ABOUTME: Exact within a family, density-approximated from volume to weight, never weight to volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unit Converter
//!
//! Every recognized unit symbol belongs to exactly one [`UnitKind`] and carries a
//! factor to that kind's canonical unit (grams for weight, milliliters for
//! volume). Normalizing an amount goes through the canonical unit:
//!
//! | user unit | base unit | result                                           |
//! |-----------|-----------|--------------------------------------------------|
//! | same text | same text | amount unchanged                                 |
//! | weight    | weight    | exact, via grams                                 |
//! | volume    | volume    | exact, via milliliters                           |
//! | volume    | weight    | cups x density hint (grams per cup), then grams  |
//! | weight    | volume    | [`ConversionFailure::WeightToVolume`]            |
//! | unknown   | any       | [`ConversionFailure::UnknownUnit`]               |
//!
//! No reverse density estimate is attempted for weight to volume.

use macro_core::constants::nutrition::{DEFAULT_GRAMS_PER_CUP, DENSITY_HINTS};
use macro_core::constants::units::{
    GRAMS_PER_GRAM, GRAMS_PER_KILOGRAM, GRAMS_PER_OUNCE, GRAMS_PER_POUND, ML_PER_CUP,
    ML_PER_FLUID_OUNCE, ML_PER_LITER, ML_PER_MILLILITER, ML_PER_TABLESPOON, ML_PER_TEASPOON,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Family a unit symbol belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Mass units, canonical unit grams
    Weight,
    /// Volume units, canonical unit milliliters
    Volume,
    /// Anything not in the unit table ("serving", "medium", "slice", ...)
    Unknown,
}

impl UnitKind {
    /// Classify a unit symbol (trimmed, case-insensitive)
    #[must_use]
    pub fn of(symbol: &str) -> Self {
        UnitDefinition::lookup(symbol).map_or(Self::Unknown, |definition| definition.kind)
    }
}

/// A recognized unit symbol and its factor to the canonical unit of its kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    /// Lowercase symbol as matched against user input
    pub symbol: &'static str,
    /// Weight or volume
    pub kind: UnitKind,
    /// Canonical units (g or ml) per one of this unit
    pub canonical_factor: f64,
}

const fn weight(symbol: &'static str, grams: f64) -> UnitDefinition {
    UnitDefinition {
        symbol,
        kind: UnitKind::Weight,
        canonical_factor: grams,
    }
}

const fn volume(symbol: &'static str, milliliters: f64) -> UnitDefinition {
    UnitDefinition {
        symbol,
        kind: UnitKind::Volume,
        canonical_factor: milliliters,
    }
}

/// Every unit symbol the converter recognizes
pub const UNIT_DEFINITIONS: &[UnitDefinition] = &[
    weight("g", GRAMS_PER_GRAM),
    weight("gram", GRAMS_PER_GRAM),
    weight("grams", GRAMS_PER_GRAM),
    weight("kg", GRAMS_PER_KILOGRAM),
    weight("kilogram", GRAMS_PER_KILOGRAM),
    weight("kilograms", GRAMS_PER_KILOGRAM),
    weight("oz", GRAMS_PER_OUNCE),
    weight("ounce", GRAMS_PER_OUNCE),
    weight("ounces", GRAMS_PER_OUNCE),
    weight("lb", GRAMS_PER_POUND),
    weight("lbs", GRAMS_PER_POUND),
    weight("pound", GRAMS_PER_POUND),
    weight("pounds", GRAMS_PER_POUND),
    volume("ml", ML_PER_MILLILITER),
    volume("milliliter", ML_PER_MILLILITER),
    volume("milliliters", ML_PER_MILLILITER),
    volume("l", ML_PER_LITER),
    volume("liter", ML_PER_LITER),
    volume("liters", ML_PER_LITER),
    volume("tsp", ML_PER_TEASPOON),
    volume("teaspoon", ML_PER_TEASPOON),
    volume("teaspoons", ML_PER_TEASPOON),
    volume("tbsp", ML_PER_TABLESPOON),
    volume("tablespoon", ML_PER_TABLESPOON),
    volume("tablespoons", ML_PER_TABLESPOON),
    volume("cup", ML_PER_CUP),
    volume("cups", ML_PER_CUP),
    volume("fl_oz", ML_PER_FLUID_OUNCE),
    volume("fl oz", ML_PER_FLUID_OUNCE),
    volume("fluid ounce", ML_PER_FLUID_OUNCE),
    volume("fluid ounces", ML_PER_FLUID_OUNCE),
];

impl UnitDefinition {
    /// Find the definition for a unit symbol (trimmed, case-insensitive)
    #[must_use]
    pub fn lookup(symbol: &str) -> Option<&'static Self> {
        let folded = fold_unit(symbol);
        UNIT_DEFINITIONS
            .iter()
            .find(|definition| definition.symbol == folded)
    }
}

fn fold_unit(symbol: &str) -> String {
    symbol.trim().to_lowercase()
}

/// Why an amount could not be normalized to the base unit
///
/// Not an application error: the attributor consumes it and falls back to the
/// serving multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversionFailure {
    /// One of the units is not in the unit table
    #[error("unrecognized unit '{unit}'")]
    UnknownUnit {
        /// The offending unit as given
        unit: String,
    },
    /// Weight to volume needs a reverse density estimate, which is not attempted
    #[error("weight cannot be converted to a volume serving")]
    WeightToVolume,
}

/// Approximate density for foods whose name contains `needle`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityHint {
    /// Lowercase substring matched against the food name
    pub needle: String,
    /// Grams per canonical cup
    pub grams_per_cup: f64,
}

/// Parameters for volume to weight conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Milliliters in the cup the densities are expressed against
    pub ml_per_cup: f64,
    /// Grams per cup when no hint matches
    pub default_grams_per_cup: f64,
    /// Hints checked in order; first match wins
    pub density_hints: Vec<DensityHint>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            ml_per_cup: ML_PER_CUP,
            default_grams_per_cup: DEFAULT_GRAMS_PER_CUP,
            density_hints: DENSITY_HINTS
                .iter()
                .map(|&(needle, grams_per_cup)| DensityHint {
                    needle: needle.to_owned(),
                    grams_per_cup,
                })
                .collect(),
        }
    }
}

impl ConversionConfig {
    /// Grams per cup for a food, from the first hint whose needle the name contains
    #[must_use]
    pub fn grams_per_cup(&self, food_name: Option<&str>) -> f64 {
        let Some(name) = food_name else {
            return self.default_grams_per_cup;
        };
        let name = name.to_lowercase();

        self.density_hints
            .iter()
            .find(|hint| name.contains(&hint.needle.to_lowercase()))
            .map_or(self.default_grams_per_cup, |hint| {
                debug!(
                    food = %name,
                    needle = %hint.needle,
                    grams_per_cup = hint.grams_per_cup,
                    "density hint matched"
                );
                hint.grams_per_cup
            })
    }
}

/// Stateless serving-unit normalizer
#[derive(Debug, Clone, Default)]
pub struct UnitConverter {
    config: ConversionConfig,
}

impl UnitConverter {
    /// Create a converter with a custom density table
    #[must_use]
    pub const fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Conversion parameters in use
    #[must_use]
    pub const fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Express `amount` of `user_unit` in `base_unit`
    ///
    /// `food_name` is only consulted for volume to weight conversion.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionFailure::UnknownUnit`] if either unit is not recognized
    /// (unless both are the same text), and [`ConversionFailure::WeightToVolume`]
    /// for the unsupported weight to volume direction.
    pub fn normalize(
        &self,
        amount: f64,
        user_unit: &str,
        base_unit: &str,
        food_name: Option<&str>,
    ) -> Result<f64, ConversionFailure> {
        if fold_unit(user_unit) == fold_unit(base_unit) {
            return Ok(amount);
        }

        let user = UnitDefinition::lookup(user_unit).ok_or_else(|| {
            ConversionFailure::UnknownUnit {
                unit: user_unit.to_owned(),
            }
        })?;
        let base = UnitDefinition::lookup(base_unit).ok_or_else(|| {
            ConversionFailure::UnknownUnit {
                unit: base_unit.to_owned(),
            }
        })?;

        match (user.kind, base.kind) {
            (UnitKind::Weight, UnitKind::Weight) | (UnitKind::Volume, UnitKind::Volume) => {
                let canonical = amount * user.canonical_factor;
                debug!(user_unit, base_unit, "same-family unit conversion");
                Ok(canonical / base.canonical_factor)
            }
            (UnitKind::Volume, UnitKind::Weight) => {
                let cups = amount * user.canonical_factor / self.config.ml_per_cup;
                let grams = cups * self.config.grams_per_cup(food_name);
                debug!(user_unit, base_unit, cups, grams, "volume to weight conversion");
                Ok(grams / base.canonical_factor)
            }
            (UnitKind::Weight, UnitKind::Volume) => Err(ConversionFailure::WeightToVolume),
            // lookup only yields Weight or Volume definitions
            (UnitKind::Unknown, _) => Err(ConversionFailure::UnknownUnit {
                unit: user_unit.to_owned(),
            }),
            (_, UnitKind::Unknown) => Err(ConversionFailure::UnknownUnit {
                unit: base_unit.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_every_symbol_is_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for definition in UNIT_DEFINITIONS {
            assert!(seen.insert(definition.symbol), "duplicate {}", definition.symbol);
            assert_eq!(definition.symbol, definition.symbol.to_lowercase());
            assert_ne!(definition.kind, UnitKind::Unknown);
            assert!(definition.canonical_factor > 0.0);
        }
    }

    #[test]
    fn test_unit_kind_classification() {
        assert_eq!(UnitKind::of("G"), UnitKind::Weight);
        assert_eq!(UnitKind::of(" Tbsp "), UnitKind::Volume);
        assert_eq!(UnitKind::of("fluid ounces"), UnitKind::Volume);
        assert_eq!(UnitKind::of("serving"), UnitKind::Unknown);
        assert_eq!(UnitKind::of("medium"), UnitKind::Unknown);
    }

    #[test]
    fn test_identity_ignores_case_even_for_unknown_units() {
        let converter = UnitConverter::default();
        assert_eq!(converter.normalize(3.0, "Serving", "serving", None).unwrap(), 3.0);
        assert_eq!(converter.normalize(0.25, "slice", "SLICE", None).unwrap(), 0.25);
    }

    #[test]
    fn test_weight_conversion_is_exact() {
        let converter = UnitConverter::default();
        let grams = converter.normalize(2.0, "lb", "g", None).unwrap();
        assert!((grams - 907.184).abs() < EPSILON);
    }

    #[test]
    fn test_volume_conversion_is_exact() {
        let converter = UnitConverter::default();
        let tbsp = converter.normalize(1.0, "cup", "tbsp", None).unwrap();
        assert!((tbsp - 240.0 / 14.7868).abs() < EPSILON);
    }

    #[test]
    fn test_density_hint_first_match_wins() {
        let config = ConversionConfig::default();
        // "chicken" precedes "rice" in the hint order
        assert_eq!(config.grams_per_cup(Some("Chicken Fried Rice")), 140.0);
        assert_eq!(config.grams_per_cup(Some("brown rice")), 185.0);
        assert_eq!(config.grams_per_cup(Some("water")), 240.0);
        assert_eq!(config.grams_per_cup(None), 240.0);
    }

    #[test]
    fn test_weight_to_volume_is_refused() {
        let converter = UnitConverter::default();
        assert_eq!(
            converter.normalize(100.0, "g", "cup", Some("rice")),
            Err(ConversionFailure::WeightToVolume)
        );
    }

    #[test]
    fn test_unknown_unit_reports_the_offending_side() {
        let converter = UnitConverter::default();
        assert_eq!(
            converter.normalize(1.0, "serving", "g", None),
            Err(ConversionFailure::UnknownUnit {
                unit: "serving".to_owned()
            })
        );
        assert_eq!(
            converter.normalize(1.0, "cup", "medium", None),
            Err(ConversionFailure::UnknownUnit {
                unit: "medium".to_owned()
            })
        );
    }
}
