// ABOUTME: Environment configuration for the API client and the local data directory
// ABOUTME: Parses TRACK_HEALTH_* variables with defaults and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based client configuration

use crate::constants::defaults;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Backend base URL
pub const API_URL_VAR: &str = "TRACK_HEALTH_API_URL";
/// Request timeout in seconds
pub const TIMEOUT_VAR: &str = "TRACK_HEALTH_TIMEOUT_SECS";
/// Connect timeout in seconds
pub const CONNECT_TIMEOUT_VAR: &str = "TRACK_HEALTH_CONNECT_TIMEOUT_SECS";
/// Notification display duration in milliseconds
pub const NOTIFICATION_MS_VAR: &str = "TRACK_HEALTH_NOTIFICATION_MS";
/// Directory holding the persisted store
pub const DATA_DIR_VAR: &str = "TRACK_HEALTH_DATA_DIR";

/// Deployment environment, drives the default log format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production build
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, endpoint paths are appended to it
    pub api_base_url: Url,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// How long a notification stays visible
    pub notification_duration: Duration,
    /// Directory holding the persisted store
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Configuration for the given backend with every other value defaulted
    #[must_use]
    pub fn for_base_url(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            notification_duration: Duration::from_millis(defaults::NOTIFICATION_DURATION_MS),
            data_dir: default_data_dir(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails
    /// [`ClientConfig::validate`].
    pub fn from_env() -> Result<Self> {
        info!("Loading client configuration from environment variables");

        let api_url = env_var_or(API_URL_VAR, defaults::API_BASE_URL);
        let config = Self {
            api_base_url: Url::parse(&api_url)
                .with_context(|| format!("Invalid {API_URL_VAR} value: {api_url}"))?,
            request_timeout: Duration::from_secs(
                env_var_or(TIMEOUT_VAR, &defaults::REQUEST_TIMEOUT_SECS.to_string())
                    .parse()
                    .with_context(|| format!("Invalid {TIMEOUT_VAR} value"))?,
            ),
            connect_timeout: Duration::from_secs(
                env_var_or(
                    CONNECT_TIMEOUT_VAR,
                    &defaults::CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .with_context(|| format!("Invalid {CONNECT_TIMEOUT_VAR} value"))?,
            ),
            notification_duration: Duration::from_millis(
                env_var_or(
                    NOTIFICATION_MS_VAR,
                    &defaults::NOTIFICATION_DURATION_MS.to_string(),
                )
                .parse()
                .with_context(|| format!("Invalid {NOTIFICATION_MS_VAR} value"))?,
            ),
            data_dir: env::var(DATA_DIR_VAR).map_or_else(|_| default_data_dir(), PathBuf::from),
        };

        config.validate()?;
        debug!("{}", config.summary());
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a non-http(s) base URL or a zero duration.
    pub fn validate(&self) -> Result<()> {
        match self.api_base_url.scheme() {
            "http" | "https" => {}
            other => bail!("{API_URL_VAR} must use http or https, got {other}"),
        }
        if self.api_base_url.cannot_be_a_base() {
            bail!("{API_URL_VAR} must be a base URL");
        }
        if self.request_timeout.is_zero() {
            bail!("{TIMEOUT_VAR} must be greater than zero");
        }
        if self.connect_timeout.is_zero() {
            bail!("{CONNECT_TIMEOUT_VAR} must be greater than zero");
        }
        if self.notification_duration.is_zero() {
            bail!("{NOTIFICATION_MS_VAR} must be greater than zero");
        }
        Ok(())
    }

    /// Replace the data directory (CLI `--data-dir`)
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Path of the JSON key-value store file
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(defaults::STORE_FILE_NAME)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Track to Health client configuration:\n\
             - API: {}\n\
             - Request timeout: {}s\n\
             - Connect timeout: {}s\n\
             - Notification: {}ms\n\
             - Data dir: {}",
            self.api_base_url,
            self.request_timeout.as_secs(),
            self.connect_timeout.as_secs(),
            self.notification_duration.as_millis(),
            display_path(&self.data_dir),
        )
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(defaults::DATA_DIR_NAME)
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert!(Environment::from_str_or_default("prod").is_production());
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }

    fn default_config() -> ClientConfig {
        ClientConfig::for_base_url(Url::parse(defaults::API_BASE_URL).unwrap())
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base_url.as_str(), "http://127.0.0.1:8000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = ClientConfig::for_base_url(Url::parse("ftp://example.com/api").unwrap());
        assert!(config.validate().is_err());
    }
}
