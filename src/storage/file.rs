// ABOUTME: Durable key-value store persisted as a single JSON document on disk
// ABOUTME: Writes replace the file atomically; a missing or corrupt file reads as empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

/// Store backed by one JSON object file
///
/// Every operation re-reads the file, so several handles (or processes run one
/// after the other, like CLI invocations) observe each other's writes. Writes
/// within one process are serialized by an async mutex.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Open (lazily) the store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> AppResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(AppError::storage(format!(
                    "cannot read {}",
                    self.path.display()
                ))
                .with_source(e))
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "Store file is corrupt, treating it as empty");
                Ok(Map::new())
            }
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let encoded = serde_json::to_vec_pretty(document)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, encoded).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }

    async fn mutate(
        &self,
        operation: &str,
        key: &str,
        apply: impl FnOnce(&mut Map<String, Value>) -> bool + Send,
    ) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        let result = if apply(&mut document) {
            self.write_document(&document).await
        } else {
            Ok(())
        };
        AppLogger::log_storage_operation(operation, key, result.is_ok());
        result
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let document = self.read_document().await?;
        Ok(document.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let value = value.to_owned();
        self.mutate("set", key, move |document| {
            document.insert(key.to_owned(), Value::String(value));
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.mutate("remove", key, |document| document.remove(key).is_some())
            .await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        let joined = keys.join(",");
        self.mutate("remove_many", &joined, |document| {
            keys.iter()
                .fold(false, |changed, key| document.remove(*key).is_some() || changed)
        })
        .await
    }

    fn backend_name(&self) -> &'static str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/storage.json"));
        assert_eq!(store.get("accessToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_of_absent_key_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("storage.json"));
        store.remove("favorites").await.unwrap();
        assert!(!store.path().exists());
    }
}
