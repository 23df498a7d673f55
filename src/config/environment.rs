// ABOUTME: Environment configuration management for the calorie tracking client
// ABOUTME: Parses backend URL, HTTP timeouts, default goal, and suggestion limit from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable                          | Default                               |
//! |-----------------------------------|---------------------------------------|
//! | `MACRO_API_URL`                   | `https://render-macro.onrender.com`   |
//! | `MACRO_HTTP_TIMEOUT_SECS`         | `10`                                  |
//! | `MACRO_HTTP_CONNECT_TIMEOUT_SECS` | `5`                                   |
//! | `MACRO_DEFAULT_GOAL`              | `2000`                                |
//! | `MACRO_SUGGESTION_LIMIT`          | `5`                                   |
//!
//! A variable that is set but cannot be parsed is a configuration error.

use crate::errors::{AppError, AppResult};
use macro_core::constants::nutrition::{DEFAULT_CALORIE_GOAL, DEFAULT_SUGGESTION_LIMIT};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::info;
use url::Url;

/// Backend used when `MACRO_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://render-macro.onrender.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// HTTP settings shared by every backend adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Backend base URL without trailing slash (nutrition proxy, auth, goal store)
    pub api_base_url: String,
    /// Whole-request timeout
    pub timeout_secs: u64,
    /// TCP connect timeout
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Backend connection settings
    pub http: HttpConfig,
    /// Goal used before (or without) an authenticated session
    pub default_goal: u32,
    /// Autocomplete suggestions kept per search
    pub suggestion_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            default_goal: DEFAULT_CALORIE_GOAL,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable is set to an unparseable value, the URL
    /// is not http(s), or the default goal is zero
    pub fn from_env() -> AppResult<Self> {
        let api_base_url = match env::var("MACRO_API_URL") {
            Ok(raw) => parse_api_url(&raw)?,
            Err(_) => DEFAULT_API_URL.to_owned(),
        };

        let default_goal: u32 = parse_env("MACRO_DEFAULT_GOAL", DEFAULT_CALORIE_GOAL)?;
        if default_goal == 0 {
            return Err(AppError::config("MACRO_DEFAULT_GOAL must be positive"));
        }

        let config = Self {
            http: HttpConfig {
                api_base_url,
                timeout_secs: parse_env("MACRO_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
                connect_timeout_secs: parse_env(
                    "MACRO_HTTP_CONNECT_TIMEOUT_SECS",
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
            },
            default_goal,
            suggestion_limit: parse_env("MACRO_SUGGESTION_LIMIT", DEFAULT_SUGGESTION_LIMIT)?,
        };

        info!(
            api_base_url = %config.http.api_base_url,
            timeout_secs = config.http.timeout_secs,
            default_goal = config.default_goal,
            "Loaded configuration from environment"
        );

        Ok(config)
    }
}

/// Parse and validate a backend base URL
///
/// Returns the URL with any trailing slash removed so paths can be appended.
///
/// # Errors
///
/// Returns `ConfigInvalid` if the URL does not parse or is not http/https
pub fn parse_api_url(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| {
        AppError::config(format!("Invalid MACRO_API_URL '{trimmed}': {e}")).with_source(e)
    })?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_owned()),
        other => Err(AppError::config(format!(
            "MACRO_API_URL must use http or https, got '{other}'"
        ))),
    }
}

fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
