// ABOUTME: Density approximations and calorie tracking defaults
// ABOUTME: Density hints are grams per canonical cup, keyed by food-name substring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Grams per cup when no density hint matches (water-equivalent)
pub const DEFAULT_GRAMS_PER_CUP: f64 = 240.0;

/// Food-name substrings and their approximate grams per cup.
///
/// Checked in this order; the first substring contained in the lowercased
/// food name wins.
pub const DENSITY_HINTS: &[(&str, f64)] = &[
    ("chicken", 140.0),
    ("rice", 185.0),
    ("oats", 90.0),
    ("sugar", 200.0),
    ("flour", 125.0),
    ("butter", 227.0),
];

/// Daily calorie goal used until an authenticated session supplies one
pub const DEFAULT_CALORIE_GOAL: u32 = 2000;

/// Number of autocomplete suggestions kept from a search
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Serving amount used when the user does not enter one
pub const DEFAULT_SERVING_AMOUNT: f64 = 1.0;

/// Serving unit used when the user does not pick one
pub const DEFAULT_SERVING_UNIT: &str = "serving";
