// ABOUTME: Core data models for the Track to Health client
// ABOUTME: Re-exports user profile, auth payloads, favorites, notifications and nutrition types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Wire-level field names follow the backend. Where the backend uses French
//! names (`poids`, `taille`, ...) the Rust fields carry English names and serde
//! renames; the English spelling is accepted as an alias on input.
//!
//! Types that mirror backend records keep unknown fields in a flattened `extra`
//! map so nothing the backend sends is lost when a snapshot is persisted.

mod auth;
mod meal;
mod notification;
mod nutrition;
mod user;

pub use auth::{
    AuthResponse, Credentials, PasswordChange, PersonalInfoUpdate, PhotoUpload, ProfileUpdate,
    RegistrationRequest, TokenPair,
};
pub use meal::{FavoriteMeal, MealId};
pub use notification::{Notification, NotificationKind};
pub use nutrition::{DailyMessage, FruitAnalysis};
pub use user::UserProfile;
