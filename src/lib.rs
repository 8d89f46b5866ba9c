// ABOUTME: Main library entry point for the Track to Health nutrition client
// ABOUTME: Session lifecycle, authenticated HTTP access, local storage and favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Track to Health
//!
//! Client library behind the Track to Health nutrition app: account
//! registration and login, profile completion, device-local favorites and the
//! photo-based fruit analyzer.
//!
//! ## Architecture
//!
//! - **Session**: `SessionManager` owns who is logged in, persists tokens and
//!   the cached profile, and reports every outcome through a notification
//! - **HTTP**: `ApiClient` attaches the persisted bearer token and publishes an
//!   auth event whenever the backend answers 401
//! - **Storage**: `KeyValueStore` backends (in-memory, JSON file) for the
//!   persisted local state
//! - **Favorites**: `FavoritesCache`, a value-copied list of meals
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use track_health::config::environment::ClientConfig;
//! use track_health::http::ApiClient;
//! use track_health::models::Credentials;
//! use track_health::session::SessionManager;
//! use track_health::storage::memory::InMemoryStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let store = Arc::new(InMemoryStore::new());
//! let api = ApiClient::new(&config, store.clone())?;
//! let session = SessionManager::new(api, store, &config);
//!
//! session.initialize().await;
//! let profile = session.login(Credentials::new("amina", "s3cret")).await?;
//! println!("Hello {}", profile.display_name());
//! # Ok(())
//! # }
//! ```

/// Environment-driven client configuration
pub mod config;

/// Device-local favorites list
pub mod favorites;

/// Authenticated HTTP client and auth events
pub mod http;

/// Structured logging setup
pub mod logging;

/// Calorie estimate and nutrition calls
pub mod nutrition;

/// Session manager and notifications
pub mod session;

/// Persisted key-value storage backends
pub mod storage;

/// Client-side form validation
pub mod validation;

pub use track_health_core::{constants, errors, models};
