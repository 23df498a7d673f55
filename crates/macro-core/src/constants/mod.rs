// ABOUTME: Application constants organized by domain
// ABOUTME: Unit conversion factors, density hints, and tracking defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Weight and volume conversion factors to canonical units
pub mod units;

/// Density hints and tracking defaults
pub mod nutrition;
