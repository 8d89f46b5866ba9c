// ABOUTME: Persisted key-value storage abstraction for tokens, the profile snapshot and favorites
// ABOUTME: Pluggable backends (in-memory, JSON file) behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON file backed store
pub mod file;
/// In-memory store
pub mod memory;

use crate::errors::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Asynchronous string-to-string store for persisted client state
///
/// Values are plain strings; structured values go through [`load_json`] and
/// [`save_json`]. Every call may fail independently and callers decide whether
/// a failure is fatal.
///
/// # Examples
///
/// ```rust,no_run
/// use track_health::storage::memory::InMemoryStore;
/// use track_health::storage::KeyValueStore;
/// # async fn example() -> Result<(), track_health::errors::AppError> {
/// let store = InMemoryStore::new();
/// store.set("accessToken", "abc").await?;
/// assert_eq!(store.get("accessToken").await?.as_deref(), Some("abc"));
/// store.remove("accessToken").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key; removing an absent key succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove several keys
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Read and decode a JSON value stored under `key`
///
/// # Errors
///
/// Returns a storage error if the read fails and a serialization error if
/// the stored text is not a valid `T`
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> AppResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`
///
/// # Errors
///
/// Returns an error if encoding or the write fails
pub async fn save_json<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded).await
}
