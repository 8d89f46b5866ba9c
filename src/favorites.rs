// ABOUTME: Device-local favorites list of meal snapshots, persisted on every change
// ABOUTME: Membership by meal id; a missing or corrupt list reads as empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::storage_keys::FAVORITES;
use crate::errors::AppResult;
use crate::models::{FavoriteMeal, MealId};
use crate::storage::{load_json, save_json, KeyValueStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Persisted list of favorited meals
///
/// Entries are copies taken when the meal was favorited. Toggles made through
/// one cache (and its clones) are serialized; separate caches over the same
/// store are last-writer-wins.
#[derive(Clone)]
pub struct FavoritesCache {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl FavoritesCache {
    /// Cache over `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Stored favorites in insertion order; never fails
    pub async fn list(&self) -> Vec<FavoriteMeal> {
        match load_json::<Vec<FavoriteMeal>>(self.store.as_ref(), FAVORITES).await {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Favorites unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Whether a meal with `meal_id` is a favorite
    pub async fn contains(&self, meal_id: MealId) -> bool {
        self.list().await.iter().any(|meal| meal.id == meal_id)
    }

    /// Remove `meal` if present, otherwise append it; returns the new membership
    ///
    /// # Errors
    ///
    /// Returns a storage error if the updated list cannot be persisted
    pub async fn toggle(&self, meal: FavoriteMeal) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.list().await;

        let now_favorite = if let Some(position) = favorites.iter().position(|m| m.id == meal.id) {
            favorites.remove(position);
            false
        } else {
            favorites.push(meal);
            true
        };

        save_json(self.store.as_ref(), FAVORITES, &favorites).await?;
        debug!(count = favorites.len(), now_favorite, "Favorites updated");
        Ok(now_favorite)
    }
}
