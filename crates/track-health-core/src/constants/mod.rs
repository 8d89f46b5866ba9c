// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, endpoint paths, defaults, and user-facing messages for the client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Keys of the persisted key-value entries
pub mod storage_keys {
    /// Bearer access token
    pub const ACCESS_TOKEN: &str = "accessToken";
    /// Refresh token
    pub const REFRESH_TOKEN: &str = "refreshToken";
    /// Cached user profile snapshot
    pub const USER_DATA: &str = "userData";
    /// Favorited meal snapshots
    pub const FAVORITES: &str = "favorites";

    /// Every credential-related key, cleared together on logout or 401
    pub const CREDENTIAL_KEYS: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_DATA];
}

/// Backend endpoint paths, relative to the configured API base URL
pub mod endpoints {
    /// Account creation
    pub const REGISTER: &str = "/register/";
    /// Credential authentication
    pub const LOGIN: &str = "/login/";
    /// Profile read and update
    pub const PROFILE: &str = "/profile/";
    /// Personal information update
    pub const PERSONAL_INFO: &str = "/profile/personal-info/";
    /// Password change
    pub const CHANGE_PASSWORD: &str = "/change-password/";
    /// Fruit photo analysis
    pub const PREDICT: &str = "/predict/";
    /// Daily notification payload
    pub const DAILY_MESSAGE: &str = "/daily-message/";
}

/// Default configuration values
pub mod defaults {
    /// Backend base URL used when none is configured
    pub const API_BASE_URL: &str = "http://127.0.0.1:8000/api";
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 20;
    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// How long a notification stays visible, in milliseconds
    pub const NOTIFICATION_DURATION_MS: u64 = 3_000;
    /// Directory name under the platform data dir
    pub const DATA_DIR_NAME: &str = "track-health";
    /// File name of the JSON key-value store
    pub const STORE_FILE_NAME: &str = "storage.json";
    /// Capacity of the auth event broadcast channel
    pub const AUTH_EVENT_CHANNEL_SIZE: usize = 16;
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("track-health/", env!("CARGO_PKG_VERSION"));
    /// Request id header name
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}

/// User-facing messages
pub mod messages {
    /// Login succeeded
    pub const LOGIN_SUCCESS: &str = "Login successful!";
    /// Login failed without a usable backend message
    pub const LOGIN_FAILED: &str = "Connection error";
    /// Registration succeeded
    pub const REGISTER_SUCCESS: &str = "Account created successfully!";
    /// Registration failed without a usable backend message
    pub const REGISTER_FAILED: &str = "Error while creating the account";
    /// Logout finished
    pub const LOGOUT_SUCCESS: &str = "Logged out successfully";
    /// Profile update succeeded
    pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
    /// Profile update failed
    pub const PROFILE_UPDATE_FAILED: &str = "Error while updating the profile";
    /// Personal information update succeeded
    pub const PERSONAL_INFO_UPDATED: &str = "Personal information updated!";
    /// Personal information update failed
    pub const PERSONAL_INFO_UPDATE_FAILED: &str = "Error while updating";
    /// Password change succeeded
    pub const PASSWORD_CHANGED: &str = "Password changed successfully!";
    /// Password change failed
    pub const PASSWORD_CHANGE_FAILED: &str = "Error while changing the password";
    /// A required form field is empty
    pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
    /// Registration password and confirmation differ
    pub const PASSWORD_CONFIRMATION_MISMATCH: &str = "Passwords do not match";
    /// New password and confirmation differ
    pub const PASSWORDS_DO_NOT_MATCH: &str = "The new passwords do not match";
    /// Age, weight or height missing from the profile form
    pub const PROFILE_FIELDS_REQUIRED: &str = "Please provide at least age, weight and height";
    /// A numeric profile value is not positive
    pub const PROFILE_VALUES_POSITIVE: &str = "Age, weight and height must be positive";
    /// Session wiped after a 401
    pub const SESSION_EXPIRED: &str = "Your session has expired, please log in again";
    /// Fruit analysis failed
    pub const ANALYSIS_FAILED: &str =
        "Unable to analyze the image. Please check your connection and try again.";
}

/// Nutrition constants (Harris-Benedict basal metabolic rate)
pub mod nutrition {
    /// BMR constant term
    pub const BMR_BASE: f64 = 88.362;
    /// BMR weight coefficient (per kg)
    pub const BMR_WEIGHT_FACTOR: f64 = 13.397;
    /// BMR height coefficient (per cm)
    pub const BMR_HEIGHT_FACTOR: f64 = 4.799;
    /// BMR age coefficient (per year)
    pub const BMR_AGE_FACTOR: f64 = 5.677;
    /// Sedentary activity multiplier
    pub const SEDENTARY_ACTIVITY_FACTOR: f64 = 1.2;
}
