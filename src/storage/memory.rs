// ABOUTME: In-memory key-value store for tests and ephemeral sessions
// ABOUTME: HashMap behind a tokio RwLock, cloned handles share the same map
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::KeyValueStore;
use crate::errors::AppResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Volatile store; contents are lost when the last handle is dropped
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(*key);
        }
        drop(entries);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_remove_many_ignores_missing_keys() {
        let store = InMemoryStore::with_entries([("a", "1"), ("b", "2"), ("c", "3")]);
        store.remove_many(&["a", "b", "zzz"]).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("c").await.unwrap().as_deref(), Some("3"));
    }
}
