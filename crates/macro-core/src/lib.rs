// ABOUTME: Core types and constants for the MacroTracker calorie client
// ABOUTME: Foundation crate with error handling, unit constants, and nutrition models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macro Core
//!
//! Foundation crate providing shared types and constants for the `MacroTracker`
//! calorie client. It has no I/O and changes infrequently, so the algorithm
//! crate and the client crate can both build on it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Unit conversion factors, density hints, and goal defaults
//! - **models**: Food records, serving specifications, logged entries, and meal buckets

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models for food lookup and logging
pub mod models;
