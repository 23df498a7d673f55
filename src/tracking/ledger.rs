// ABOUTME: In-memory food ledger grouping logged entries into meal buckets
// ABOUTME: Keeps buckets and the running calorie total behind one lock so readers never see them disagree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::{LoggedFoodEntry, MealBucket};
use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Debug, Default)]
struct LedgerState {
    buckets: [Vec<LoggedFoodEntry>; 4],
    total_calories: u64,
}

/// Consistent copy of the ledger taken under a single read lock
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSnapshot {
    /// Entries per meal, in [`MealBucket::ALL`] order
    pub meals: Vec<(MealBucket, Vec<LoggedFoodEntry>)>,
    /// Running total across all meals
    pub total_calories: u64,
}

impl LedgerSnapshot {
    /// Entries logged under `meal`
    #[must_use]
    pub fn entries(&self, meal: MealBucket) -> &[LoggedFoodEntry] {
        self.meals
            .iter()
            .find(|(bucket, _)| *bucket == meal)
            .map_or(&[], |(_, entries)| entries.as_slice())
    }

    /// Number of entries across all meals
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.meals.iter().map(|(_, entries)| entries.len()).sum()
    }
}

/// Per-meal log of attributed foods with a running total
///
/// `append` and `clear_all` take the write lock, so the total always equals
/// the sum of every entry's calories.
#[derive(Debug, Default)]
pub struct FoodLedger {
    state: RwLock<LedgerState>,
}

impl FoodLedger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, LedgerState>> {
        self.state
            .read()
            .map_err(|_| AppError::internal("RwLock poisoned: ledger lock"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state
            .write()
            .map_err(|_| AppError::internal("RwLock poisoned: ledger lock"))
    }

    /// Push `entry` to the end of `meal` and add its calories to the total
    ///
    /// # Errors
    ///
    /// Returns an internal error if the ledger lock is poisoned
    pub fn append(&self, meal: MealBucket, entry: LoggedFoodEntry) -> AppResult<()> {
        let mut state = self.write()?;
        state.total_calories = state
            .total_calories
            .saturating_add(u64::from(entry.calories));
        debug!(
            meal = %meal,
            food = %entry.name,
            calories = entry.calories,
            total = state.total_calories,
            "ledger append"
        );
        state.buckets[meal.index()].push(entry);
        Ok(())
    }

    /// Empty every meal and reset the total in one update
    ///
    /// # Errors
    ///
    /// Returns an internal error if the ledger lock is poisoned
    pub fn clear_all(&self) -> AppResult<()> {
        let mut state = self.write()?;
        *state = LedgerState::default();
        info!("ledger cleared");
        Ok(())
    }

    /// Running calorie total
    ///
    /// # Errors
    ///
    /// Returns an internal error if the ledger lock is poisoned
    pub fn total_calories(&self) -> AppResult<u64> {
        Ok(self.read()?.total_calories)
    }

    /// Copy of the entries logged under `meal`, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an internal error if the ledger lock is poisoned
    pub fn entries(&self, meal: MealBucket) -> AppResult<Vec<LoggedFoodEntry>> {
        Ok(self.read()?.buckets[meal.index()].clone())
    }

    /// Buckets and total read together
    ///
    /// # Errors
    ///
    /// Returns an internal error if the ledger lock is poisoned
    pub fn snapshot(&self) -> AppResult<LedgerSnapshot> {
        let state = self.read()?;
        Ok(LedgerSnapshot {
            meals: MealBucket::ALL
                .iter()
                .map(|meal| (*meal, state.buckets[meal.index()].clone()))
                .collect(),
            total_calories: state.total_calories,
        })
    }
}
