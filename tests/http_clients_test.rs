// ABOUTME: Integration tests for the HTTP backend adapters against a local stub server
// ABOUTME: Verifies the JSON contract, status code mapping, and percent-encoded goal paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use macro_tracker::config::TrackerConfig;
use macro_tracker::errors::ErrorCode;
use macro_tracker::external::{
    AuthService, GoalStore, HttpAuthClient, HttpGoalStore, HttpNutritionClient,
    NutritionProvider,
};
use macro_tracker::models::{MealBucket, ServingSpec};
use macro_tracker::session::{Session, MSG_FOOD_NOT_FOUND};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

mod common;

type Goals = Arc<Mutex<HashMap<String, u32>>>;

async fn instant(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("query").map(String::as_str) {
        Some("rice") => Json(json!({
            "common": [
                {"food_name": "cooked rice"},
                {"food_name": "brown rice"},
                {"food_name": "rice pudding"}
            ]
        }))
        .into_response(),
        Some("boom") => (StatusCode::BAD_GATEWAY, "upstream failed").into_response(),
        _ => Json(json!({})).into_response(),
    }
}

async fn nutrients(Json(body): Json<Value>) -> Response {
    match body["query"].as_str() {
        Some("cooked rice") => Json(json!({
            "foods": [
                {"food_name": "cooked rice", "serving_qty": 1, "serving_unit": "cup", "nf_calories": 206},
                {"food_name": "rice cake", "serving_qty": 1, "serving_unit": "cake", "nf_calories": 35}
            ]
        }))
        .into_response(),
        Some("chicken") => Json(json!({
            "foods": [
                {"food_name": "chicken breast", "serving_qty": 100, "serving_unit": "g", "nf_calories": 165}
            ]
        }))
        .into_response(),
        Some("missing") => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "We couldn't match any of your foods"})),
        )
            .into_response(),
        Some("boom") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Nutritionix request failed"})),
        )
            .into_response(),
        Some("negative") => Json(json!({
            "foods": [{"food_name": "odd", "serving_qty": 1, "serving_unit": "cup", "nf_calories": -5}]
        }))
        .into_response(),
        _ => Json(json!({"foods": []})).into_response(),
    }
}

fn credentials(body: &Value) -> Option<(&str, &str)> {
    let username = body["username"].as_str().filter(|s| !s.is_empty())?;
    let password = body["password"].as_str().filter(|s| !s.is_empty())?;
    Some((username, password))
}

async fn register(Json(body): Json<Value>) -> Response {
    match credentials(&body) {
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing username or password"})),
        )
            .into_response(),
        Some(("sam", _)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Username already exists"})),
        )
            .into_response(),
        Some(_) => (
            StatusCode::CREATED,
            Json(json!({"message": "User registered successfully"})),
        )
            .into_response(),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    match credentials(&body) {
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing username or password"})),
        )
            .into_response(),
        Some(("sam", "secret")) => {
            Json(json!({"message": "Login successful", "username": "sam"})).into_response()
        }
        Some(("crash", _)) => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
        Some(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid username or password"})),
        )
            .into_response(),
    }
}

async fn get_goal(State(goals): State<Goals>, Path(username): Path<String>) -> Response {
    let stored = goals.lock().unwrap().get(&username).copied();
    stored.map_or_else(
        || (StatusCode::NOT_FOUND, Json(json!({"error": "User not found"}))).into_response(),
        |goal| Json(json!({"calorieGoal": goal})).into_response(),
    )
}

async fn set_goal(
    State(goals): State<Goals>,
    Path(username): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if username == "ghost" {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "User not found"}))).into_response();
    }
    let Some(goal) = body["newGoal"].as_u64() else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Missing newGoal"}))).into_response();
    };
    let goal = u32::try_from(goal).unwrap();
    goals.lock().unwrap().insert(username, goal);
    Json(json!({"calorieGoal": goal})).into_response()
}

/// Start the stub backend on an ephemeral port and return its base URL
async fn spawn_backend() -> (String, Goals) {
    common::init_test_logging();
    let goals: Goals = Arc::new(Mutex::new(HashMap::from([("sam".to_owned(), 1800)])));

    let app = Router::new()
        .route("/api/nutrition/search/instant", get(instant))
        .route("/api/nutrition/natural/nutrients", post(nutrients))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/user/:username/goal", get(get_goal).post(set_goal))
        .with_state(goals.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), goals)
}

// ============================================================================
// NUTRITION
// ============================================================================

#[tokio::test]
async fn test_search_returns_common_names_in_order() {
    let (base_url, _) = spawn_backend().await;
    let client = HttpNutritionClient::new(base_url);

    let names = client.search("rice").await.unwrap();
    assert_eq!(names, ["cooked rice", "brown rice", "rice pudding"]);
    assert!(client.search("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_error_status() {
    let (base_url, _) = spawn_backend().await;
    let client = HttpNutritionClient::new(base_url);

    let err = client.search("boom").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_lookup_uses_first_food() {
    let (base_url, _) = spawn_backend().await;
    let client = HttpNutritionClient::new(base_url);

    let food = client.lookup("cooked rice").await.unwrap();
    assert_eq!(food.name, "cooked rice");
    assert_eq!(food.serving_unit, "cup");
    common::assert_close(food.serving_qty, 1.0);
    common::assert_close(food.calories_per_serving, 206.0);
}

#[tokio::test]
async fn test_lookup_not_found_cases() {
    let (base_url, _) = spawn_backend().await;
    let client = HttpNutritionClient::new(base_url);

    for query in ["missing", "nothing"] {
        let err = client.lookup(query).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound, "query {query}");
    }
}

#[tokio::test]
async fn test_lookup_failures() {
    let (base_url, _) = spawn_backend().await;
    let client = HttpNutritionClient::new(base_url);

    assert_eq!(
        client.lookup("boom").await.unwrap_err().code,
        ErrorCode::ExternalServiceError
    );
    assert_eq!(
        client.lookup("negative").await.unwrap_err().code,
        ErrorCode::ExternalServiceError
    );
}

#[tokio::test]
async fn test_unreachable_backend() {
    common::init_test_logging();
    let client = HttpNutritionClient::new("http://127.0.0.1:1");
    let err = client.lookup("apple").await.unwrap_err();
    assert!(err.code.is_external());
}

// ============================================================================
// AUTH
// ============================================================================

#[tokio::test]
async fn test_register_status_mapping() {
    let (base_url, _) = spawn_backend().await;
    let client = HttpAuthClient::new(base_url);

    client.register("alex", "pw").await.unwrap();

    let taken = client.register("sam", "pw").await.unwrap_err();
    assert_eq!(taken.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(taken.message, "Username already exists");

    let missing = client.register("", "pw").await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::InvalidInput);
    assert_eq!(missing.message, "Missing username or password");
}

#[tokio::test]
async fn test_login_status_mapping() {
    let (base_url, _) = spawn_backend().await;
    let client = HttpAuthClient::new(base_url);

    client.login("sam", "secret").await.unwrap();

    let wrong = client.login("sam", "nope").await.unwrap_err();
    assert_eq!(wrong.code, ErrorCode::AuthInvalid);
    assert_eq!(wrong.message, "Invalid username or password");

    let down = client.login("crash", "pw").await.unwrap_err();
    assert_eq!(down.code, ErrorCode::ExternalServiceError);
}

// ============================================================================
// GOAL STORE
// ============================================================================

#[tokio::test]
async fn test_goal_round_trip() {
    let (base_url, goals) = spawn_backend().await;
    let store = HttpGoalStore::new(base_url);

    assert_eq!(store.get_goal("sam").await.unwrap(), Some(1800));
    store.set_goal("sam", 2100).await.unwrap();
    assert_eq!(store.get_goal("sam").await.unwrap(), Some(2100));
    assert_eq!(goals.lock().unwrap().get("sam"), Some(&2100));
}

#[tokio::test]
async fn test_goal_absent_and_rejected() {
    let (base_url, _) = spawn_backend().await;
    let store = HttpGoalStore::new(base_url);

    assert_eq!(store.get_goal("nobody").await.unwrap(), None);
    let err = store.set_goal("ghost", 1500).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_goal_username_is_percent_encoded() {
    let (base_url, goals) = spawn_backend().await;
    let store = HttpGoalStore::new(base_url);

    store.set_goal("jo ann/b", 1750).await.unwrap();
    assert_eq!(goals.lock().unwrap().get("jo ann/b"), Some(&1750));
    assert_eq!(store.get_goal("jo ann/b").await.unwrap(), Some(1750));
}

// ============================================================================
// SESSION OVER HTTP
// ============================================================================

#[tokio::test]
async fn test_session_over_http_backend() {
    let (base_url, goals) = spawn_backend().await;
    let mut session = Session::new(
        &TrackerConfig::default(),
        Arc::new(HttpNutritionClient::new(base_url.as_str())),
        Arc::new(HttpAuthClient::new(base_url.as_str())),
        Arc::new(HttpGoalStore::new(base_url.as_str())),
    );

    assert_eq!(session.suggestions("rice").await.len(), 3);

    session.login("sam", "secret").await.unwrap();
    assert_eq!(session.summary().unwrap().goal, 1800);

    let serving = ServingSpec::new(200.0, "grams").unwrap();
    let outcome = session
        .search_and_log(MealBucket::Dinner, "chicken", &serving)
        .await
        .unwrap();
    assert_eq!(outcome.entry.calories, 330);

    let err = session
        .search_and_log(MealBucket::Dinner, "missing", &serving)
        .await
        .unwrap_err();
    assert_eq!(err.message, MSG_FOOD_NOT_FOUND);

    session.set_goal(1900).await.unwrap();
    assert_eq!(goals.lock().unwrap().get("sam"), Some(&1900));

    let summary = session.summary().unwrap();
    assert_eq!(summary.eaten, 330);
    assert_eq!(summary.status, "You have 1570 calories remaining");
}
