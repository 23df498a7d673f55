// ABOUTME: Daily calorie goal tracking with best-effort persistence to the goal store
// ABOUTME: Derives remaining calories and fraction consumed from the goal and the ledger total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal Tracker
//!
//! The local goal is authoritative. When a user is bound (after login or
//! registration), edits are mirrored to the goal store; a failed write is
//! logged and the local value stays.

use crate::errors::{AppError, AppResult};
use crate::external::GoalStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

/// What happened to a goal edit beyond the local update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPersistence {
    /// No user bound; only the local value changed
    LocalOnly,
    /// Written to the goal store
    Persisted,
    /// Store write failed; local value kept
    Failed,
}

/// Calories left before reaching `goal`, never negative
#[must_use]
pub fn remaining_calories(goal: u32, eaten: u64) -> u64 {
    u64::from(goal).saturating_sub(eaten)
}

/// Share of `goal` already eaten, clamped to `[0, 1]`; 0 when the goal is 0
#[must_use]
pub fn fraction_consumed(goal: u32, eaten: u64) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (eaten as f64 / f64::from(goal)).clamp(0.0, 1.0)
}

#[derive(Debug)]
struct GoalState {
    goal: u32,
    username: Option<String>,
}

/// Holds the daily goal and the optional user it is persisted for
pub struct GoalTracker {
    state: RwLock<GoalState>,
    store: Arc<dyn GoalStore>,
}

impl GoalTracker {
    /// Create a tracker with `initial_goal` and no bound user
    #[must_use]
    pub fn new(store: Arc<dyn GoalStore>, initial_goal: u32) -> Self {
        Self {
            state: RwLock::new(GoalState {
                goal: initial_goal,
                username: None,
            }),
            store,
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, GoalState>> {
        self.state
            .read()
            .map_err(|_| AppError::internal("RwLock poisoned: goal lock"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, GoalState>> {
        self.state
            .write()
            .map_err(|_| AppError::internal("RwLock poisoned: goal lock"))
    }

    /// Current goal
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub fn goal(&self) -> AppResult<u32> {
        Ok(self.read()?.goal)
    }

    /// User whose goal is mirrored to the store, if any
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub fn bound_user(&self) -> AppResult<Option<String>> {
        Ok(self.read()?.username.clone())
    }

    /// Attach the store to `username`
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub fn bind(&self, username: impl Into<String>) -> AppResult<()> {
        self.write()?.username = Some(username.into());
        Ok(())
    }

    /// Detach from the store, keeping the local goal
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub fn unbind(&self) -> AppResult<()> {
        self.write()?.username = None;
        Ok(())
    }

    /// Replace the local goal with the stored one for the bound user
    ///
    /// Returns the loaded goal. An absent value or a failed read keeps the local goal.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub async fn load_from_store(&self) -> AppResult<Option<u32>> {
        let Some(username) = self.bound_user()? else {
            return Ok(None);
        };

        match self.store.get_goal(&username).await {
            Ok(Some(goal)) => {
                self.write()?.goal = goal;
                info!(user = %username, goal, "goal loaded from store");
                Ok(Some(goal))
            }
            Ok(None) => {
                info!(user = %username, "no stored goal, keeping local value");
                Ok(None)
            }
            Err(e) => {
                warn!(user = %username, error = %e, "goal fetch failed, keeping local value");
                Ok(None)
            }
        }
    }

    /// Set the goal locally and mirror it to the store when a user is bound
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero goal, or an internal error if the goal
    /// lock is poisoned. Store failures are not errors.
    pub async fn set_goal(&self, value: u32) -> AppResult<GoalPersistence> {
        if value == 0 {
            return Err(AppError::invalid_input("Calorie goal must be a positive number"));
        }

        let username = {
            let mut state = self.write()?;
            state.goal = value;
            state.username.clone()
        };
        info!(goal = value, "calorie goal updated");

        let Some(username) = username else {
            return Ok(GoalPersistence::LocalOnly);
        };

        match self.store.set_goal(&username, value).await {
            Ok(()) => Ok(GoalPersistence::Persisted),
            Err(e) => {
                warn!(
                    user = %username,
                    goal = value,
                    error = %e,
                    "goal persistence failed, keeping local value"
                );
                Ok(GoalPersistence::Failed)
            }
        }
    }

    /// Calories left for `eaten` against the current goal
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub fn remaining(&self, eaten: u64) -> AppResult<u64> {
        Ok(remaining_calories(self.goal()?, eaten))
    }

    /// Fraction of the current goal consumed by `eaten`
    ///
    /// # Errors
    ///
    /// Returns an internal error if the goal lock is poisoned
    pub fn fraction_consumed(&self, eaten: u64) -> AppResult<f64> {
        Ok(fraction_consumed(self.goal()?, eaten))
    }
}
