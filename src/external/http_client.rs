// ABOUTME: Shared HTTP client with connection pooling for backend API calls
// ABOUTME: Singleton pattern with configurable timeouts initialized at client startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HttpConfig;
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Configured timeout values for the shared client
static CLIENT_TIMEOUTS: OnceLock<(u64, u64)> = OnceLock::new();

/// Global shared HTTP client with configured timeouts
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Initialize the shared HTTP client timeout configuration
///
/// Must be called once at startup before any adapter sends a request.
/// If not called, defaults are used (10s timeout, 5s connect timeout).
pub fn initialize_shared_client(config: &HttpConfig) {
    if CLIENT_TIMEOUTS
        .set((config.timeout_secs, config.connect_timeout_secs))
        .is_err()
    {
        debug!("shared HTTP client timeouts already initialized");
    }
}

/// Get the shared HTTP client for backend API calls
///
/// Falls back to default timeouts if `initialize_shared_client()` was not called.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let (timeout, connect_timeout) = CLIENT_TIMEOUTS
            .get()
            .copied()
            .unwrap_or((DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS));

        ClientBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Milliseconds since `started`, saturating
pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
