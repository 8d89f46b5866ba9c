// ABOUTME: Authentication and account payloads exchanged with the backend
// ABOUTME: Token pair, credentials, registration, profile and password change requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque bearer credentials returned by login and registration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access: String,
    /// Longer-lived refresh token
    pub refresh: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// Body of a successful `POST /login/` or `POST /register/`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Issued token pair
    pub tokens: TokenPair,
    /// Optional user echo; the client always re-fetches the full profile
    #[serde(default)]
    pub user: Option<Value>,
    /// Optional backend message
    #[serde(default)]
    pub message: Option<String>,
}

/// Username/password pair for `POST /login/`
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Login name
    pub username: String,
    /// Plain password, sent over the wire only
    pub password: String,
}

impl Credentials {
    /// Build credentials from borrowed strings
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Account creation form for `POST /register/`
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Desired login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Given name
    #[serde(default)]
    pub first_name: String,
    /// Family name
    #[serde(default)]
    pub last_name: String,
    /// Password
    pub password: String,
    /// Password confirmation
    pub password2: String,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Image attached to a profile update, sent as multipart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// File name reported to the backend
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,
}

/// Partial update for `PUT /profile/`; `None` fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Weight in kilograms
    #[serde(default, rename = "poids", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(default, rename = "taille", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Free-text allergies
    #[serde(default, rename = "allergie", skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    /// Dietary preference
    #[serde(default, rename = "preference", skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
    /// Daily caloric need in kcal
    #[serde(
        default,
        rename = "besoin_calorique",
        skip_serializing_if = "Option::is_none"
    )]
    pub daily_calorie_need: Option<f64>,
    /// Profile photo; switches the request to multipart
    #[serde(skip)]
    pub photo: Option<PhotoUpload>,
}

impl ProfileUpdate {
    /// Whether the update carries no field at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Text fields as `(wire name, value)` pairs for multipart bodies
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(age) = self.age {
            fields.push(("age", age.to_string()));
        }
        if let Some(weight) = self.weight_kg {
            fields.push(("poids", weight.to_string()));
        }
        if let Some(height) = self.height_cm {
            fields.push(("taille", height.to_string()));
        }
        if let Some(allergies) = &self.allergies {
            fields.push(("allergie", allergies.clone()));
        }
        if let Some(preference) = &self.dietary_preference {
            fields.push(("preference", preference.clone()));
        }
        if let Some(calories) = self.daily_calorie_need {
            fields.push(("besoin_calorique", calories.to_string()));
        }
        fields
    }
}

/// Personal information form for `PUT /profile/personal-info/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfoUpdate {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
}

/// Password change form for `POST /change-password/`
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PasswordChange {
    /// Current password
    pub old_password: String,
    /// Desired password
    pub new_password: String,
    /// Confirmation of the desired password
    pub new_password2: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}
