// ABOUTME: Authentication client for account registration and credential checks
// ABOUTME: HTTP adapter for the backend register/login endpoints plus an in-memory double
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication Service Client
//!
//! `POST /register` and `POST /login` take `{"username", "password"}`. Failures
//! carry `{"error": "<reason>"}`; the status code selects the error class:
//!
//! | Status | Meaning                         | `ErrorCode`             |
//! |--------|---------------------------------|-------------------------|
//! | 401    | wrong username or password      | `AuthInvalid`           |
//! | 400    | "Username already exists"       | `ResourceAlreadyExists` |
//! | 400    | any other rejected input        | `InvalidInput`          |
//! | other  | backend failure                 | `ExternalServiceError`  |

use super::http_client::{elapsed_ms, shared_client};
use crate::errors::{from_transport_error, AppError, AppResult};
use crate::logging::AppLogger;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

/// Service name used in error messages and logs
const SERVICE_NAME: &str = "Auth service";

/// External account service
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` for a taken username, `InvalidInput` for
    /// missing fields, or an external service error
    async fn register(&self, username: &str, password: &str) -> AppResult<()>;

    /// Verify credentials
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for wrong credentials, or an external service error
    async fn login(&self, username: &str, password: &str) -> AppResult<()>;
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the backend auth endpoints
pub struct HttpAuthClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpAuthClient {
    /// Create a client for the backend at `base_url` using the shared HTTP pool
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: shared_client().clone(),
        }
    }

    async fn post_credentials(
        &self,
        operation: &str,
        username: &str,
        password: &str,
    ) -> AppResult<()> {
        let started = Instant::now();
        let url = format!("{}/{operation}", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(|e| from_transport_error(SERVICE_NAME, e))?;

        let success = response.status().is_success();
        AppLogger::log_backend_request(SERVICE_NAME, operation, success, elapsed_ms(started));
        if success {
            return Ok(());
        }
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let reason = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("HTTP {status}"));

    match status {
        StatusCode::UNAUTHORIZED => AppError::auth_invalid(reason),
        StatusCode::BAD_REQUEST if reason.contains("already exists") => {
            AppError::already_exists(reason)
        }
        StatusCode::BAD_REQUEST => AppError::invalid_input(reason),
        _ => AppError::external_service(SERVICE_NAME, reason),
    }
}

#[async_trait]
impl AuthService for HttpAuthClient {
    async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        self.post_credentials("register", username, password).await
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        self.post_credentials("login", username, password).await
    }
}

/// In-memory account store with the backend's validation rules
///
/// Backs offline sessions and tests. Passwords are kept in memory only.
#[derive(Debug, Default)]
pub struct InMemoryAuthService {
    accounts: RwLock<HashMap<String, String>>,
}

impl InMemoryAuthService {
    /// Create an empty account store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn require_credentials(username: &str, password: &str) -> AppResult<()> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::invalid_input("Missing username or password"));
    }
    Ok(())
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        require_credentials(username, password)?;
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AppError::internal("RwLock poisoned: accounts lock"))?;
        if accounts.contains_key(username) {
            return Err(AppError::already_exists("Username already exists"));
        }
        accounts.insert(username.to_owned(), password.to_owned());
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        require_credentials(username, password)?;
        let accounts = self
            .accounts
            .read()
            .map_err(|_| AppError::internal("RwLock poisoned: accounts lock"))?;
        match accounts.get(username) {
            Some(stored) if stored == password => Ok(()),
            _ => Err(AppError::auth_invalid("Invalid username or password")),
        }
    }
}
