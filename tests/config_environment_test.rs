// ABOUTME: Integration tests for environment-driven client configuration
// ABOUTME: Defaults, overrides and validation failures for TRACK_HEALTH_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use track_health::config::environment::{
    ClientConfig, API_URL_VAR, CONNECT_TIMEOUT_VAR, DATA_DIR_VAR, NOTIFICATION_MS_VAR,
    TIMEOUT_VAR,
};
use track_health::constants::defaults;

const ALL_VARS: [&str; 5] = [
    API_URL_VAR,
    TIMEOUT_VAR,
    CONNECT_TIMEOUT_VAR,
    NOTIFICATION_MS_VAR,
    DATA_DIR_VAR,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.api_base_url.as_str(), defaults::API_BASE_URL);
    assert_eq!(
        config.request_timeout,
        Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS)
    );
    assert_eq!(
        config.notification_duration,
        Duration::from_millis(defaults::NOTIFICATION_DURATION_MS)
    );
    assert!(config.data_dir.ends_with(defaults::DATA_DIR_NAME));
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var(API_URL_VAR, "https://nutrition.example.com/api/");
    env::set_var(TIMEOUT_VAR, "5");
    env::set_var(NOTIFICATION_MS_VAR, "1500");
    env::set_var(DATA_DIR_VAR, "/tmp/track-health-test");

    let config = ClientConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.notification_duration, Duration::from_millis(1500));
    assert_eq!(
        config.store_path(),
        PathBuf::from("/tmp/track-health-test").join(defaults::STORE_FILE_NAME)
    );
    assert_eq!(
        config.api_base_url.as_str(),
        "https://nutrition.example.com/api/"
    );
}

#[test]
#[serial]
fn test_non_http_scheme_is_rejected() {
    clear_env();
    env::set_var(API_URL_VAR, "ftp://nutrition.example.com/api");
    let result = ClientConfig::from_env();
    clear_env();

    let message = result.unwrap_err().to_string();
    assert!(message.contains("http"), "unexpected error: {message}");
}

#[test]
#[serial]
fn test_unparseable_values_are_rejected() {
    clear_env();
    env::set_var(API_URL_VAR, "not a url");
    assert!(ClientConfig::from_env().is_err());

    clear_env();
    env::set_var(TIMEOUT_VAR, "soon");
    assert!(ClientConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    clear_env();
    env::set_var(CONNECT_TIMEOUT_VAR, "0");
    let result = ClientConfig::from_env();
    clear_env();

    assert!(result.is_err());
}
