// ABOUTME: Configuration management module for client settings and parameters
// ABOUTME: Loads backend endpoint, HTTP timeouts, and tracking defaults from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for `MacroTracker`
//!
//! - **Environment**: backend URL, HTTP timeouts, default goal, suggestion limit
//!
//! Conversion parameters (cup size, density hints) live with the algorithms in
//! `macro_intelligence::ConversionConfig`.

/// Environment-driven client configuration
pub mod environment;

pub use environment::{parse_api_url, HttpConfig, TrackerConfig, DEFAULT_API_URL};
