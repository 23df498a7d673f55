// ABOUTME: Explicit session context tying lookup, attribution, ledger, goal, and auth together
// ABOUTME: Implements the search-and-log flow and the register/login/logout lifecycle with user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tracking Session
//!
//! A [`Session`] is created at session start with its collaborators and owns
//! the food ledger and goal tracker. Every operation returns an [`AppResult`]
//! whose error message is ready to show to the user.
//!
//! ```text
//! query + serving ──► NutritionProvider::lookup ──► CalorieAttributor
//!                                                        │
//!                           GoalTracker ◄── FoodLedger ◄─┘
//! ```
//!
//! Failed lookups leave the ledger untouched. Suggestions and goal
//! persistence degrade silently; lookup and auth failures are surfaced.

use crate::config::TrackerConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::external::{AuthService, GoalStore, NutritionProvider};
use crate::logging::AppLogger;
use crate::models::{LoggedFoodEntry, MealBucket, ServingSpec};
use crate::tracking::{
    fraction_consumed, remaining_calories, FoodLedger, GoalPersistence, GoalTracker,
    LedgerSnapshot,
};
use macro_intelligence::{AttributionMethod, CalorieAttribution, CalorieAttributor};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shown when the food query is blank
pub const MSG_EMPTY_QUERY: &str = "Please enter a food name.";
/// Shown when the lookup has no match
pub const MSG_FOOD_NOT_FOUND: &str = "Food not found. Try another search.";
/// Shown when the lookup fails for any other reason
pub const MSG_SEARCH_FAILED: &str = "Error searching food. Try again.";
/// Shown when a username or password is blank
pub const MSG_MISSING_CREDENTIALS: &str = "Missing username or password";
/// Shown when registration passwords differ
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
/// Shown when the auth service cannot be reached
pub const MSG_AUTH_UNREACHABLE: &str = "Unable to reach the authentication service.";
/// Status line for guests
pub const MSG_GUEST_STATUS: &str = "Sign in to save your calorie goal!";

/// Result of a successful search-and-log
#[derive(Debug, Clone, Serialize)]
pub struct LogOutcome {
    /// Entry appended to the ledger
    pub entry: LoggedFoodEntry,
    /// Meal it was filed under
    pub meal: MealBucket,
    /// How the calories were derived
    pub attribution: CalorieAttribution,
    /// Confirmation line, e.g. "Added apple (95 cal) to breakfast"
    pub message: String,
}

/// Totals against the goal for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Current goal
    pub goal: u32,
    /// Calories logged
    pub eaten: u64,
    /// Calories left, never negative
    pub remaining: u64,
    /// Share of the goal eaten, in `[0, 1]`
    pub fraction_consumed: f64,
    /// Status line for the header
    pub status: String,
    /// Authenticated user, if any
    pub username: Option<String>,
}

/// Single-user tracking session
pub struct Session {
    nutrition: Arc<dyn NutritionProvider>,
    auth: Arc<dyn AuthService>,
    attributor: CalorieAttributor,
    ledger: FoodLedger,
    goal: GoalTracker,
    username: Option<String>,
    suggestion_limit: usize,
}

impl Session {
    /// Start a guest session with the configured default goal
    #[must_use]
    pub fn new(
        config: &TrackerConfig,
        nutrition: Arc<dyn NutritionProvider>,
        auth: Arc<dyn AuthService>,
        goal_store: Arc<dyn GoalStore>,
    ) -> Self {
        Self {
            nutrition,
            auth,
            attributor: CalorieAttributor::default(),
            ledger: FoodLedger::new(),
            goal: GoalTracker::new(goal_store, config.default_goal),
            username: None,
            suggestion_limit: config.suggestion_limit,
        }
    }

    /// Replace the attributor (e.g. one built with custom density hints)
    #[must_use]
    pub fn with_attributor(mut self, attributor: CalorieAttributor) -> Self {
        self.attributor = attributor;
        self
    }

    /// Authenticated username, if any
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether a user is logged in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Food ledger for this session
    #[must_use]
    pub const fn ledger(&self) -> &FoodLedger {
        &self.ledger
    }

    /// Goal tracker for this session
    #[must_use]
    pub const fn goal_tracker(&self) -> &GoalTracker {
        &self.goal
    }

    /// Autocomplete names for `query`, at most the configured limit
    ///
    /// A blank query returns nothing without calling the provider; provider
    /// failures also return nothing.
    pub async fn suggestions(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.nutrition.search(query).await {
            Ok(mut names) => {
                names.truncate(self.suggestion_limit);
                names
            }
            Err(e) => {
                warn!(query, error = %e, "suggestion fetch failed");
                Vec::new()
            }
        }
    }

    /// Look up `query`, attribute calories for `serving`, and log it under `meal`
    ///
    /// # Errors
    ///
    /// - `InvalidInput` with "Please enter a food name." for a blank query
    /// - `ResourceNotFound` with "Food not found. Try another search."
    /// - an external service code with "Error searching food. Try again."
    ///
    /// The ledger is unchanged on every error.
    pub async fn search_and_log(
        &self,
        meal: MealBucket,
        query: &str,
        serving: &ServingSpec,
    ) -> AppResult<LogOutcome> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input(MSG_EMPTY_QUERY));
        }

        let food = self.nutrition.lookup(query).await.map_err(|e| {
            warn!(query, error = %e, "food lookup failed");
            match e.code {
                ErrorCode::ResourceNotFound => {
                    AppError::new(ErrorCode::ResourceNotFound, MSG_FOOD_NOT_FOUND).with_source(e)
                }
                ErrorCode::ExternalServiceUnavailable => {
                    AppError::new(ErrorCode::ExternalServiceUnavailable, MSG_SEARCH_FAILED)
                        .with_source(e)
                }
                _ => AppError::new(ErrorCode::ExternalServiceError, MSG_SEARCH_FAILED)
                    .with_source(e),
            }
        })?;

        let attribution = self.attributor.attribute(serving, &food);
        let entry = LoggedFoodEntry::new(food.name, attribution.calories, serving);
        let message = format!("Added {} ({} cal) to {meal}", entry.name, entry.calories);

        self.ledger.append(meal, entry.clone())?;
        AppLogger::log_food_logged(
            &entry.name,
            meal.key(),
            entry.calories,
            method_name(&attribution.method),
        );

        Ok(LogOutcome {
            entry,
            meal,
            attribution,
            message,
        })
    }

    /// Create an account and sign in as it
    ///
    /// # Errors
    ///
    /// `InvalidInput` with "Missing username or password" or "Passwords do not
    /// match" (no network call), or the auth service's rejection reason
    pub async fn register(
        &mut self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<()> {
        require_credentials(username, password)?;
        if password != confirm_password {
            return Err(AppError::invalid_input(MSG_PASSWORD_MISMATCH));
        }

        if let Err(e) = self.auth.register(username, password).await {
            AppLogger::log_auth_event(username, "register", false, Some(&e.message));
            return Err(auth_failure(e));
        }
        AppLogger::log_auth_event(username, "register", true, None);

        self.authenticate(username)
    }

    /// Sign in, then best-effort load the stored goal
    ///
    /// # Errors
    ///
    /// `InvalidInput` with "Missing username or password" (no network call), the
    /// auth service's rejection reason, or a generic message when it is unreachable
    pub async fn login(&mut self, username: &str, password: &str) -> AppResult<()> {
        require_credentials(username, password)?;
        if let Err(e) = self.auth.login(username, password).await {
            AppLogger::log_auth_event(username, "login", false, Some(&e.message));
            return Err(auth_failure(e));
        }
        AppLogger::log_auth_event(username, "login", true, None);

        self.authenticate(username)?;
        self.goal.load_from_store().await?;
        Ok(())
    }

    /// Drop the authenticated identity; goal value and ledger stay
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub fn logout(&mut self) -> AppResult<()> {
        if let Some(username) = self.username.take() {
            AppLogger::log_auth_event(&username, "logout", true, None);
        }
        self.goal.unbind()
    }

    fn authenticate(&mut self, username: &str) -> AppResult<()> {
        self.goal.bind(username)?;
        self.username = Some(username.to_owned());
        info!(user = %username, "session authenticated");
        Ok(())
    }

    /// Change the goal; persisted for signed-in users on a best-effort basis
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero goal
    pub async fn set_goal(&self, value: u32) -> AppResult<GoalPersistence> {
        self.goal.set_goal(value).await
    }

    /// Empty the ledger
    ///
    /// # Errors
    ///
    /// Returns an internal error if the ledger lock is poisoned
    pub fn clear_all(&self) -> AppResult<()> {
        self.ledger.clear_all()
    }

    /// Logged entries per meal with the running total
    ///
    /// # Errors
    ///
    /// Returns an internal error if the ledger lock is poisoned
    pub fn snapshot(&self) -> AppResult<LedgerSnapshot> {
        self.ledger.snapshot()
    }

    /// Goal, eaten, remaining, and status line
    ///
    /// # Errors
    ///
    /// Returns an internal error if a lock is poisoned
    pub fn summary(&self) -> AppResult<DailySummary> {
        let goal = self.goal.goal()?;
        let eaten = self.ledger.total_calories()?;
        let remaining = remaining_calories(goal, eaten);
        let status = if self.is_authenticated() {
            format!("You have {remaining} calories remaining")
        } else {
            MSG_GUEST_STATUS.to_owned()
        };

        Ok(DailySummary {
            goal,
            eaten,
            remaining,
            fraction_consumed: fraction_consumed(goal, eaten),
            status,
            username: self.username.clone(),
        })
    }
}

fn require_credentials(username: &str, password: &str) -> AppResult<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::invalid_input(MSG_MISSING_CREDENTIALS));
    }
    Ok(())
}

/// Keep the service's reason for rejections; hide transport details
fn auth_failure(error: AppError) -> AppError {
    if error.code.is_external() || error.code == ErrorCode::SerializationError {
        AppError::new(ErrorCode::ExternalServiceError, MSG_AUTH_UNREACHABLE).with_source(error)
    } else {
        error
    }
}

const fn method_name(method: &AttributionMethod) -> &'static str {
    match method {
        AttributionMethod::UnitScaled { .. } => "unit_scaled",
        AttributionMethod::ServingMultiplier { .. } => "serving_multiplier",
    }
}
