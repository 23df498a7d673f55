// ABOUTME: Re-exports the unified error types from macro-core
// ABOUTME: Adds helpers that translate reqwest transport errors into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! The error types live in `macro-core` so the algorithm crates can use them
//! without the HTTP stack. This module re-exports them for the client and adds
//! the transport-error mapping used by every backend adapter.

pub use macro_core::errors::{AppError, AppResult, ErrorCode};

/// Map a reqwest failure to `ExternalServiceUnavailable` (could not reach the
/// service) or `ExternalServiceError` (anything else)
#[must_use]
pub fn from_transport_error(service: &str, error: reqwest::Error) -> AppError {
    let message = error.to_string();
    if error.is_timeout() || error.is_connect() {
        AppError::external_unavailable(service, message).with_source(error)
    } else if error.is_decode() {
        AppError::new(
            ErrorCode::SerializationError,
            format!("{service}: invalid response body: {message}"),
        )
        .with_source(error)
    } else {
        AppError::external_service(service, message).with_source(error)
    }
}
