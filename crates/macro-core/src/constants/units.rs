// ABOUTME: Unit conversion constants for weight and volume serving units
// ABOUTME: Canonical units are grams for weight and milliliters for volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Grams per gram (canonical weight unit)
pub const GRAMS_PER_GRAM: f64 = 1.0;

/// Grams per kilogram
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Grams per avoirdupois ounce
pub const GRAMS_PER_OUNCE: f64 = 28.3495;

/// Grams per pound
pub const GRAMS_PER_POUND: f64 = 453.592;

/// Milliliters per milliliter (canonical volume unit)
pub const ML_PER_MILLILITER: f64 = 1.0;

/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

/// Milliliters per US teaspoon
pub const ML_PER_TEASPOON: f64 = 4.92892;

/// Milliliters per US tablespoon
pub const ML_PER_TABLESPOON: f64 = 14.7868;

/// Milliliters per cup (rounded nutrition-label cup)
pub const ML_PER_CUP: f64 = 240.0;

/// Milliliters per US fluid ounce
pub const ML_PER_FLUID_OUNCE: f64 = 29.5735;
