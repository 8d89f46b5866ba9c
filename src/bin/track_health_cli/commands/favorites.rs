// ABOUTME: Favorites commands for the track-health CLI
// ABOUTME: List and toggle device-local favorite meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use track_health::favorites::FavoritesCache;
use track_health::models::FavoriteMeal;

use crate::helpers::display::display_favorites;

/// Print every favorite
pub async fn list(favorites: &FavoritesCache) -> Result<()> {
    display_favorites(&favorites.list().await);
    Ok(())
}

/// Add or remove a meal
pub async fn toggle(
    favorites: &FavoritesCache,
    id: u64,
    name: String,
    description: Option<String>,
) -> Result<()> {
    let mut meal = FavoriteMeal::new(id, name);
    if let Some(description) = description {
        meal = meal.with_description(description);
    }
    let label = meal.name.clone();

    if favorites.toggle(meal).await? {
        println!("Added \"{label}\" to favorites");
    } else {
        println!("Removed \"{label}\" from favorites");
    }
    Ok(())
}
