// ABOUTME: Integration tests for the goal tracker
// ABOUTME: Covers derived values, validation, store binding, and best-effort persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macro_tracker::errors::ErrorCode;
use macro_tracker::external::{GoalStore, InMemoryGoalStore};
use macro_tracker::tracking::{GoalPersistence, GoalTracker};
use std::sync::Arc;

mod common;

fn tracker(goal: u32) -> (GoalTracker, Arc<InMemoryGoalStore>) {
    common::init_test_logging();
    let store = Arc::new(InMemoryGoalStore::new());
    (GoalTracker::new(store.clone(), goal), store)
}

#[test]
fn test_remaining_and_fraction() {
    let (goal, _) = tracker(2000);
    assert_eq!(goal.remaining(500).unwrap(), 1500);
    assert_eq!(goal.remaining(2600).unwrap(), 0);
    common::assert_close(goal.fraction_consumed(500).unwrap(), 0.25);
    common::assert_close(goal.fraction_consumed(2600).unwrap(), 1.0);
    common::assert_close(goal.fraction_consumed(0).unwrap(), 0.0);
}

#[test]
fn test_zero_goal_guard() {
    let (goal, _) = tracker(0);
    assert_eq!(goal.remaining(300).unwrap(), 0);
    common::assert_close(goal.fraction_consumed(300).unwrap(), 0.0);
}

#[tokio::test]
async fn test_guest_goal_is_local_only() {
    let (goal, store) = tracker(2000);
    let outcome = goal.set_goal(1800).await.unwrap();

    assert_eq!(outcome, GoalPersistence::LocalOnly);
    assert_eq!(goal.goal().unwrap(), 1800);
    assert_eq!(store.stored("anyone").unwrap(), None);
}

#[tokio::test]
async fn test_zero_goal_edit_rejected() {
    let (goal, _) = tracker(2000);
    let err = goal.set_goal(0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(goal.goal().unwrap(), 2000);
}

#[tokio::test]
async fn test_bound_goal_is_persisted() {
    let (goal, store) = tracker(2000);
    goal.bind("sam").unwrap();

    assert_eq!(goal.set_goal(2200).await.unwrap(), GoalPersistence::Persisted);
    assert_eq!(store.stored("sam").unwrap(), Some(2200));
}

#[tokio::test]
async fn test_failed_persistence_keeps_local_value() {
    let (goal, store) = tracker(2000);
    goal.bind("sam").unwrap();
    store.set_fail_writes(true);

    assert_eq!(goal.set_goal(2500).await.unwrap(), GoalPersistence::Failed);
    assert_eq!(goal.goal().unwrap(), 2500);
    assert_eq!(store.stored("sam").unwrap(), None);
}

#[tokio::test]
async fn test_load_from_store() {
    let (goal, store) = tracker(2000);
    store.set_goal("sam", 1700).await.unwrap();

    // Not bound yet: nothing to load
    assert_eq!(goal.load_from_store().await.unwrap(), None);
    assert_eq!(goal.goal().unwrap(), 2000);

    goal.bind("sam").unwrap();
    assert_eq!(goal.load_from_store().await.unwrap(), Some(1700));
    assert_eq!(goal.goal().unwrap(), 1700);
}

#[tokio::test]
async fn test_load_absent_or_failed_keeps_local_value() {
    let (goal, store) = tracker(2100);
    goal.bind("newcomer").unwrap();
    assert_eq!(goal.load_from_store().await.unwrap(), None);
    assert_eq!(goal.goal().unwrap(), 2100);

    store.set_goal("newcomer", 1500).await.unwrap();
    store.set_fail_reads(true);
    assert_eq!(goal.load_from_store().await.unwrap(), None);
    assert_eq!(goal.goal().unwrap(), 2100);
}

#[tokio::test]
async fn test_unbind_stops_persistence() {
    let (goal, store) = tracker(2000);
    goal.bind("sam").unwrap();
    goal.unbind().unwrap();

    assert_eq!(goal.bound_user().unwrap(), None);
    assert_eq!(goal.set_goal(1900).await.unwrap(), GoalPersistence::LocalOnly);
    assert_eq!(store.stored("sam").unwrap(), None);
    assert_eq!(goal.goal().unwrap(), 1900);
}
