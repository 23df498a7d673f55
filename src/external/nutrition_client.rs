// ABOUTME: Nutrition lookup client for autocomplete suggestions and food detail retrieval
// ABOUTME: HTTP adapter for the backend nutrition proxy plus an in-memory mock with preset foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Lookup Client
//!
//! The backend proxies a natural-language nutrition API and exposes two
//! endpoints:
//!
//! - `GET /api/nutrition/search/instant?query=...` returns
//!   `{"common": [{"food_name": "..."}]}` for autocomplete
//! - `POST /api/nutrition/natural/nutrients` with `{"query": "..."}` returns
//!   `{"foods": [{"food_name", "serving_qty", "serving_unit", "nf_calories"}]}`
//!
//! Only the first food of a detail response is used.
//!
//! # Example
//! ```rust,no_run
//! use macro_tracker::external::{HttpNutritionClient, NutritionProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpNutritionClient::new("https://render-macro.onrender.com");
//! let food = client.lookup("cooked rice").await?;
//! println!("{} kcal per {} {}", food.calories_per_serving, food.serving_qty, food.serving_unit);
//! # Ok(())
//! # }
//! ```

use super::http_client::{elapsed_ms, shared_client};
use crate::errors::{from_transport_error, AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::FoodRecord;
use async_trait::async_trait;
use macro_core::constants::nutrition::DEFAULT_SERVING_UNIT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;
use tracing::debug;

/// Service name used in error messages and logs
const SERVICE_NAME: &str = "Nutrition API";

/// Source of food suggestions and food details
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Candidate food names for a partial query, in the provider's order
    ///
    /// # Errors
    ///
    /// Returns an external service error if the provider cannot be queried
    async fn search(&self, query: &str) -> AppResult<Vec<String>>;

    /// Food record for a query, using the first match
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when nothing matches, or an external service
    /// error if the provider cannot be queried
    async fn lookup(&self, query: &str) -> AppResult<FoodRecord>;
}

#[derive(Debug, Deserialize)]
struct InstantSearchResponse {
    #[serde(default)]
    common: Vec<CommonFood>,
}

#[derive(Debug, Deserialize)]
struct CommonFood {
    food_name: String,
}

#[derive(Debug, Serialize)]
struct NutrientsRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct NutrientsResponse {
    #[serde(default)]
    foods: Vec<NutrientFood>,
}

#[derive(Debug, Deserialize)]
struct NutrientFood {
    food_name: String,
    #[serde(default)]
    serving_qty: Option<f64>,
    #[serde(default)]
    serving_unit: Option<String>,
    #[serde(default)]
    nf_calories: Option<f64>,
}

impl NutrientFood {
    fn into_record(self) -> AppResult<FoodRecord> {
        FoodRecord::new(
            self.food_name,
            self.serving_qty.unwrap_or(1.0),
            self.serving_unit.unwrap_or_else(|| DEFAULT_SERVING_UNIT.to_owned()),
            self.nf_calories.unwrap_or(0.0),
        )
        .map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("invalid food data: {}", e.message))
        })
    }
}

/// HTTP client for the backend nutrition proxy
pub struct HttpNutritionClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpNutritionClient {
    /// Create a client for the backend at `base_url` using the shared HTTP pool
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: shared_client().clone(),
        }
    }
}

#[async_trait]
impl NutritionProvider for HttpNutritionClient {
    async fn search(&self, query: &str) -> AppResult<Vec<String>> {
        let started = Instant::now();
        let url = format!("{}/api/nutrition/search/instant", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| from_transport_error(SERVICE_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            AppLogger::log_backend_request(SERVICE_NAME, "search", false, elapsed_ms(started));
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!(
                    "HTTP {status}: {}",
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let body: InstantSearchResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        AppLogger::log_backend_request(SERVICE_NAME, "search", true, elapsed_ms(started));
        Ok(body.common.into_iter().map(|food| food.food_name).collect())
    }

    async fn lookup(&self, query: &str) -> AppResult<FoodRecord> {
        let started = Instant::now();
        let url = format!("{}/api/nutrition/natural/nutrients", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&NutrientsRequest { query })
            .send()
            .await
            .map_err(|e| from_transport_error(SERVICE_NAME, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            AppLogger::log_backend_request(SERVICE_NAME, "lookup", false, elapsed_ms(started));
            return Err(AppError::not_found(format!("Food '{query}'")));
        }
        if !status.is_success() {
            AppLogger::log_backend_request(SERVICE_NAME, "lookup", false, elapsed_ms(started));
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!(
                    "HTTP {status}: {}",
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        let body: NutrientsResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        AppLogger::log_backend_request(SERVICE_NAME, "lookup", true, elapsed_ms(started));
        let Some(first) = body.foods.into_iter().next() else {
            return Err(AppError::not_found(format!("Food '{query}'")));
        };
        first.into_record()
    }
}

/// Mock nutrition client for testing and offline use (no API calls)
pub struct MockNutritionClient {
    foods: Vec<FoodRecord>,
    outage: AtomicBool,
    calls: AtomicUsize,
}

impl MockNutritionClient {
    /// Create a new mock client with predefined foods
    #[must_use]
    pub fn new() -> Self {
        let presets = [
            ("cooked rice", 1.0, "cup", 206.0),
            ("chicken breast", 100.0, "g", 165.0),
            ("apple", 1.0, "medium", 95.0),
            ("banana", 1.0, "medium", 105.0),
            ("whole milk", 1.0, "cup", 149.0),
            ("rolled oats", 40.0, "g", 150.0),
            ("butter", 1.0, "tbsp", 102.0),
            ("peanut butter", 2.0, "tbsp", 188.0),
            ("egg", 1.0, "large", 72.0),
        ];

        let foods = presets
            .into_iter()
            .map(|(name, qty, unit, calories)| FoodRecord {
                name: name.to_owned(),
                serving_qty: qty,
                serving_unit: unit.to_owned(),
                calories_per_serving: calories,
            })
            .collect();

        Self::with_foods(foods)
    }

    /// Create a mock client serving exactly `foods`
    #[must_use]
    pub const fn with_foods(foods: Vec<FoodRecord>) -> Self {
        Self {
            foods,
            outage: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Simulate the provider being unreachable
    pub fn set_outage(&self, outage: bool) {
        self.outage.store(outage, Ordering::SeqCst);
    }

    /// Number of search and lookup calls received
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin_call(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.outage.load(Ordering::SeqCst) {
            return Err(AppError::external_unavailable(SERVICE_NAME, "simulated outage"));
        }
        Ok(())
    }
}

impl Default for MockNutritionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NutritionProvider for MockNutritionClient {
    async fn search(&self, query: &str) -> AppResult<Vec<String>> {
        self.begin_call()?;
        let needle = query.trim().to_lowercase();
        Ok(self
            .foods
            .iter()
            .filter(|food| food.name.to_lowercase().contains(&needle))
            .map(|food| food.name.clone())
            .collect())
    }

    async fn lookup(&self, query: &str) -> AppResult<FoodRecord> {
        self.begin_call()?;
        let needle = query.trim().to_lowercase();

        // Exact name first so "butter" does not resolve to "peanut butter"
        let found = self
            .foods
            .iter()
            .find(|food| food.name.to_lowercase() == needle)
            .or_else(|| {
                self.foods
                    .iter()
                    .find(|food| food.name.to_lowercase().contains(&needle))
            });

        found.cloned().map_or_else(
            || {
                debug!(query, "mock nutrition lookup found nothing");
                Err(AppError::not_found(format!("Food '{query}'")))
            },
            Ok,
        )
    }
}
