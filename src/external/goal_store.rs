// ABOUTME: Calorie goal persistence keyed by username
// ABOUTME: HTTP adapter for the backend goal endpoints plus an in-memory store with failure injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::http_client::{elapsed_ms, shared_client};
use crate::errors::{from_transport_error, AppError, AppResult};
use crate::logging::AppLogger;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::Instant;

/// Service name used in error messages and logs
const SERVICE_NAME: &str = "Goal store";

/// Key-value store for a user's daily calorie goal
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Stored goal for `username`, or `None` when nothing is stored
    ///
    /// # Errors
    ///
    /// Returns an external service error if the store cannot be read
    async fn get_goal(&self, username: &str) -> AppResult<Option<u32>>;

    /// Persist `goal` for `username`
    ///
    /// # Errors
    ///
    /// Returns an external service error if the store rejects or cannot take the write
    async fn set_goal(&self, username: &str, goal: u32) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalResponse {
    calorie_goal: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalUpdate {
    new_goal: u32,
}

/// HTTP client for `GET/POST /user/{username}/goal`
pub struct HttpGoalStore {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpGoalStore {
    /// Create a store client for the backend at `base_url` using the shared HTTP pool
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: shared_client().clone(),
        }
    }

    fn goal_url(&self, username: &str) -> String {
        format!(
            "{}/user/{}/goal",
            self.base_url,
            urlencoding::encode(username)
        )
    }
}

#[async_trait]
impl GoalStore for HttpGoalStore {
    async fn get_goal(&self, username: &str) -> AppResult<Option<u32>> {
        let started = Instant::now();
        let response = self
            .http_client
            .get(self.goal_url(username))
            .send()
            .await
            .map_err(|e| from_transport_error(SERVICE_NAME, e))?;

        let status = response.status();
        AppLogger::log_backend_request(
            SERVICE_NAME,
            "get_goal",
            status.is_success(),
            elapsed_ms(started),
        );
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::external_service(SERVICE_NAME, format!("HTTP {status}")));
        }

        let body: GoalResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;
        Ok(body.calorie_goal)
    }

    async fn set_goal(&self, username: &str, goal: u32) -> AppResult<()> {
        let started = Instant::now();
        let response = self
            .http_client
            .post(self.goal_url(username))
            .json(&GoalUpdate { new_goal: goal })
            .send()
            .await
            .map_err(|e| from_transport_error(SERVICE_NAME, e))?;

        let status = response.status();
        AppLogger::log_backend_request(
            SERVICE_NAME,
            "set_goal",
            status.is_success(),
            elapsed_ms(started),
        );
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::external_service(
                SERVICE_NAME,
                format!(
                    "HTTP {status}: {}",
                    response.text().await.unwrap_or_default()
                ),
            ))
        }
    }
}

/// In-memory goal store for offline sessions and tests
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    goals: RwLock<HashMap<String, u32>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryGoalStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `get_goal` fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every `set_goal` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stored value without going through the async trait
    ///
    /// # Errors
    ///
    /// Returns an internal error if the lock is poisoned
    pub fn stored(&self, username: &str) -> AppResult<Option<u32>> {
        let goals = self
            .goals
            .read()
            .map_err(|_| AppError::internal("RwLock poisoned: goals lock"))?;
        Ok(goals.get(username).copied())
    }
}

#[async_trait]
impl GoalStore for InMemoryGoalStore {
    async fn get_goal(&self, username: &str) -> AppResult<Option<u32>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::external_unavailable(SERVICE_NAME, "simulated read failure"));
        }
        self.stored(username)
    }

    async fn set_goal(&self, username: &str, goal: u32) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::external_unavailable(SERVICE_NAME, "simulated write failure"));
        }
        let mut goals = self
            .goals
            .write()
            .map_err(|_| AppError::internal("RwLock poisoned: goals lock"))?;
        goals.insert(username.to_owned(), goal);
        Ok(())
    }
}
