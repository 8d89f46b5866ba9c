// ABOUTME: User profile model with the explicit shallow-merge update contract
// ABOUTME: Maps backend wire names (poids, taille, allergie, ...) to English fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authenticated user's profile as returned by `GET /profile/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id
    pub id: u64,
    /// Login name
    #[serde(default)]
    pub username: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Body weight in kilograms
    #[serde(
        default,
        rename = "poids",
        alias = "weight_kg",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(
        default,
        rename = "taille",
        alias = "height_cm",
        skip_serializing_if = "Option::is_none"
    )]
    pub height_cm: Option<f64>,
    /// Free-text allergies
    #[serde(
        default,
        rename = "allergie",
        alias = "allergies",
        skip_serializing_if = "Option::is_none"
    )]
    pub allergies: Option<String>,
    /// Dietary preference (vegetarian, ...)
    #[serde(
        default,
        rename = "preference",
        alias = "dietary_preference",
        skip_serializing_if = "Option::is_none"
    )]
    pub dietary_preference: Option<String>,
    /// Estimated daily caloric need in kcal
    #[serde(
        default,
        rename = "besoin_calorique",
        alias = "daily_calorie_need",
        skip_serializing_if = "Option::is_none"
    )]
    pub daily_calorie_need: Option<f64>,
    /// Backend fields this client does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Wire name for a field key, folding English aliases onto backend names
    #[must_use]
    pub fn canonical_key(key: &str) -> &str {
        match key {
            "weight_kg" => "poids",
            "height_cm" => "taille",
            "allergies" => "allergie",
            "dietary_preference" => "preference",
            "daily_calorie_need" => "besoin_calorique",
            other => other,
        }
    }

    /// Shallow-merge `patch` over this profile and return the result
    ///
    /// Every top-level field present in `patch` overwrites the local value
    /// (including explicit `null`s); fields absent from `patch` are kept.
    /// `self` is not modified, so callers can persist the merged profile before
    /// publishing it.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `patch` is not a JSON object or the
    /// merged document no longer describes a valid profile.
    pub fn merge_from(&self, patch: &Value) -> AppResult<Self> {
        let Value::Object(patch_fields) = patch else {
            return Err(AppError::serialization(
                "profile update payload is not a JSON object",
            ));
        };

        let Value::Object(mut merged) = serde_json::to_value(self)? else {
            return Err(AppError::internal("profile did not serialize to an object"));
        };

        for (key, value) in patch_fields {
            merged.insert(Self::canonical_key(key).to_owned(), value.clone());
        }

        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// Display name for greetings
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> UserProfile {
        serde_json::from_value(json!({
            "id": 7,
            "username": "amina",
            "email": "amina@example.com",
            "first_name": "Amina",
            "last_name": "K",
            "age": 29,
            "poids": 61.5,
            "taille": 168.0,
            "allergie": "peanuts",
            "photo": "/media/amina.jpg"
        }))
        .unwrap()
    }

    #[test]
    fn test_backend_names_map_to_fields() {
        let profile = sample();
        assert_eq!(profile.weight_kg, Some(61.5));
        assert_eq!(profile.height_cm, Some(168.0));
        assert_eq!(profile.allergies.as_deref(), Some("peanuts"));
        assert_eq!(profile.extra.get("photo"), Some(&json!("/media/amina.jpg")));
    }

    #[test]
    fn test_merge_overwrites_present_and_keeps_absent_fields() {
        let merged = sample()
            .merge_from(&json!({"poids": 60.0, "preference": "vegetarian"}))
            .unwrap();
        assert_eq!(merged.weight_kg, Some(60.0));
        assert_eq!(merged.dietary_preference.as_deref(), Some("vegetarian"));
        assert_eq!(merged.height_cm, Some(168.0));
        assert_eq!(merged.username, "amina");
        assert_eq!(merged.extra.get("photo"), Some(&json!("/media/amina.jpg")));
    }

    #[test]
    fn test_merge_accepts_english_aliases() {
        let merged = sample().merge_from(&json!({"weight_kg": 58.0})).unwrap();
        assert_eq!(merged.weight_kg, Some(58.0));
    }

    #[test]
    fn test_merge_rejects_non_object() {
        assert!(sample().merge_from(&json!(["nope"])).is_err());
    }
}
