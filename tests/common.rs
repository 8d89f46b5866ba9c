// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Mock backend helpers, in-memory sessions and sample payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `track_health`

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};
use track_health::config::environment::ClientConfig;
use track_health::errors::{AppError, AppResult};
use track_health::http::ApiClient;
use track_health::session::SessionManager;
use track_health::storage::memory::InMemoryStore;
use track_health::storage::KeyValueStore;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Client configuration pointing at `{server}/api`
pub fn test_config(server_uri: &str) -> ClientConfig {
    ClientConfig::for_base_url(Url::parse(&format!("{server_uri}/api")).unwrap())
}

/// Configuration for a backend nobody listens on
pub fn unreachable_config() -> ClientConfig {
    test_config("http://127.0.0.1:9")
}

/// Session wired to an in-memory store
pub struct TestSession {
    pub session: SessionManager,
    pub store: Arc<InMemoryStore>,
    pub api: ApiClient,
}

/// Build a session over `store` talking to `config`
pub fn session_with_store(config: &ClientConfig, store: Arc<InMemoryStore>) -> TestSession {
    init_test_logging();
    let api = ApiClient::new(config, store.clone()).unwrap();
    let session = SessionManager::new(api.clone(), store.clone(), config);
    TestSession {
        session,
        store,
        api,
    }
}

/// Build a session over an empty store
pub fn new_session(config: &ClientConfig) -> TestSession {
    session_with_store(config, Arc::new(InMemoryStore::new()))
}

/// In-memory store whose writes and removals can be made to fail per key
#[derive(Default)]
pub struct FailingStore {
    pub inner: InMemoryStore,
    failing_sets: Mutex<HashSet<String>>,
    failing_removes: Mutex<HashSet<String>>,
    failing_bulk_removal: AtomicBool,
}

impl FailingStore {
    /// Every `set` of `key` fails from now on
    pub fn fail_set(&self, key: &str) {
        self.failing_sets.lock().unwrap().insert(key.to_owned());
    }

    /// Every `remove` of `key` fails from now on
    pub fn fail_remove(&self, key: &str) {
        self.failing_removes.lock().unwrap().insert(key.to_owned());
    }

    /// `remove_many` fails from now on; single removals still work
    pub fn fail_bulk_removal(&self) {
        self.failing_bulk_removal.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if self.failing_sets.lock().unwrap().contains(key) {
            return Err(AppError::storage(format!("disk full writing {key}")));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        if self.failing_removes.lock().unwrap().contains(key) {
            return Err(AppError::storage(format!("cannot remove {key}")));
        }
        self.inner.remove(key).await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        if self.failing_bulk_removal.load(Ordering::SeqCst) {
            return Err(AppError::storage("bulk removal unavailable"));
        }
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Session and client over a store that can be told to fail
pub fn session_on_failing_store(
    config: &ClientConfig,
    store: Arc<FailingStore>,
) -> (SessionManager, ApiClient) {
    init_test_logging();
    let api = ApiClient::new(config, store.clone()).unwrap();
    let session = SessionManager::new(api.clone(), store, config);
    (session, api)
}

/// Backend profile payload
pub fn profile_json(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "first_name": "Amina",
        "last_name": "Kaci",
        "age": 29,
        "poids": 61.5,
        "taille": 168.0,
        "allergie": "peanuts",
        "preference": "vegetarian",
        "besoin_calorique": 1900.0
    })
}

/// Login/register success payload
pub fn tokens_json(access: &str, refresh: &str) -> Value {
    json!({
        "message": "ok",
        "tokens": {"access": access, "refresh": refresh}
    })
}

/// `POST /api/login/` answering with the given token pair
pub async fn mount_login_success(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tokens_json(access, refresh)))
        .mount(server)
        .await;
}

/// `GET /api/profile/` answering `profile` when called with `token`
pub async fn mount_profile(server: &MockServer, token: &str, profile: Value) {
    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile))
        .mount(server)
        .await;
}

/// Log `username` in against a mock backend
pub async fn logged_in(server: &MockServer, username: &str, access: &str) -> TestSession {
    mount_login_success(server, access, &format!("{access}-refresh")).await;
    mount_profile(server, access, profile_json(1, username)).await;
    let test = new_session(&test_config(&server.uri()));
    test.session
        .login(track_health::models::Credentials::new(username, "s3cret"))
        .await
        .unwrap();
    test
}
