// ABOUTME: Serving-unit normalization and calorie attribution engine
// ABOUTME: Extracted from the client crate so the pure algorithms build and test in isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macro Intelligence
//!
//! The calculation core of `MacroTracker`:
//!
//! - [`unit_converter`]: maps an (amount, unit) pair onto a food's native serving
//!   unit, within a unit family or from volume to weight through a density hint
//! - [`calorie_attributor`]: turns the normalized amount into an integer calorie
//!   value, falling back to a plain serving multiplier when no conversion applies

/// Weight/volume unit table and amount normalization
pub mod unit_converter;

/// Calorie attribution from serving input and food records
pub mod calorie_attributor;

pub use calorie_attributor::{
    round_calories, AttributionMethod, CalorieAttribution, CalorieAttributor, FallbackReason,
};
pub use unit_converter::{
    ConversionConfig, ConversionFailure, DensityHint, UnitConverter, UnitDefinition, UnitKind,
};
