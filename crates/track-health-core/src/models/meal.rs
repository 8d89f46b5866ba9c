// ABOUTME: Favorited meal snapshot stored by value in the local favorites list
// ABOUTME: Keyed by meal id; unknown meal fields are preserved verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a meal record
pub type MealId = u64;

/// Denormalized copy of a meal record taken when it was favorited
///
/// The copy is never refreshed from its source: edits made to the meal after
/// favoriting do not reach the stored snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMeal {
    /// Meal id, the uniqueness key of the favorites list
    pub id: MealId,
    /// Display name
    pub name: String,
    /// Image reference (asset id or `{ "uri": ... }` object)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Remaining meal fields (category, calories, ingredients, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FavoriteMeal {
    /// Minimal snapshot with only an id and a name
    pub fn new(id: MealId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
