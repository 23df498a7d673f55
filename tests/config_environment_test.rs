// ABOUTME: Unit tests for environment configuration loading
// ABOUTME: Validates defaults, URL validation, numeric parsing, and goal constraints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macro_tracker::config::{parse_api_url, TrackerConfig, DEFAULT_API_URL};
use macro_tracker::errors::ErrorCode;
use serial_test::serial;
use std::env;

const VARS: [&str; 5] = [
    "MACRO_API_URL",
    "MACRO_DEFAULT_GOAL",
    "MACRO_HTTP_TIMEOUT_SECS",
    "MACRO_HTTP_CONNECT_TIMEOUT_SECS",
    "MACRO_SUGGESTION_LIMIT",
];

fn clear_env() {
    for key in VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();
    let config = TrackerConfig::from_env().unwrap();
    assert_eq!(config, TrackerConfig::default());
    assert_eq!(config.http.api_base_url, DEFAULT_API_URL);
    assert_eq!(config.default_goal, 2000);
    assert_eq!(config.suggestion_limit, 5);
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    env::set_var("MACRO_API_URL", "http://localhost:8080/");
    env::set_var("MACRO_DEFAULT_GOAL", " 1800 ");
    env::set_var("MACRO_HTTP_TIMEOUT_SECS", "3");
    env::set_var("MACRO_SUGGESTION_LIMIT", "8");

    let config = TrackerConfig::from_env().unwrap();
    assert_eq!(config.http.api_base_url, "http://localhost:8080");
    assert_eq!(config.http.timeout_secs, 3);
    assert_eq!(config.http.connect_timeout_secs, 5);
    assert_eq!(config.default_goal, 1800);
    assert_eq!(config.suggestion_limit, 8);

    clear_env();
}

#[test]
#[serial]
fn test_zero_goal_rejected() {
    clear_env();
    env::set_var("MACRO_DEFAULT_GOAL", "0");

    let err = TrackerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert_eq!(err.message, "MACRO_DEFAULT_GOAL must be positive");

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_numbers_rejected() {
    clear_env();
    for (key, value) in [
        ("MACRO_DEFAULT_GOAL", "-100"),
        ("MACRO_HTTP_TIMEOUT_SECS", "ten"),
        ("MACRO_SUGGESTION_LIMIT", "2.5"),
    ] {
        env::set_var(key, value);
        let err = TrackerConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid, "{key}={value}");
        assert!(err.message.contains(key), "{}", err.message);
        env::remove_var(key);
    }
    clear_env();
}

#[test]
#[serial]
fn test_invalid_url_rejected() {
    clear_env();
    env::set_var("MACRO_API_URL", "ftp://example.com");
    let err = TrackerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("'ftp'"));
    clear_env();
}

#[test]
fn test_parse_api_url() {
    assert_eq!(
        parse_api_url("  https://api.example.com/v1/  ").unwrap(),
        "https://api.example.com/v1"
    );
    assert_eq!(
        parse_api_url("http://127.0.0.1:3000").unwrap(),
        "http://127.0.0.1:3000"
    );
    assert_eq!(
        parse_api_url("not a url").unwrap_err().code,
        ErrorCode::ConfigInvalid
    );
}
