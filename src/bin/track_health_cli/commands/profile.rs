// ABOUTME: Profile commands for the track-health CLI
// ABOUTME: Show the profile, complete the nutrition profile and edit personal information
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use std::path::PathBuf;
use track_health::models::{PersonalInfoUpdate, ProfileUpdate};
use track_health::nutrition::{estimate_daily_calories, load_photo};
use track_health::session::SessionManager;
use track_health::validation::validate_profile_form;

use crate::helpers::display::{display_notification, display_profile};

/// Values of the profile completion form
pub struct ProfileForm {
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub allergies: Option<String>,
    pub dietary_preference: Option<String>,
    pub daily_calorie_need: Option<f64>,
    pub photo: Option<PathBuf>,
}

/// Print the logged-in profile, refreshed from the backend when possible
pub async fn show(session: &SessionManager) -> Result<()> {
    session.initialize().await;
    match session.current_user() {
        Some(profile) => {
            display_profile(&profile);
            Ok(())
        }
        None => bail!("Not logged in"),
    }
}

/// Submit the profile completion form
pub async fn update(session: &SessionManager, form: ProfileForm) -> Result<()> {
    validate_profile_form(form.age, form.weight_kg, form.height_cm)?;

    let estimated = match (form.age, form.weight_kg, form.height_cm) {
        (Some(age), Some(weight), Some(height)) => estimate_daily_calories(age, weight, height),
        _ => None,
    };
    let photo = match &form.photo {
        Some(path) => Some(load_photo(path).await?),
        None => None,
    };

    let update = ProfileUpdate {
        age: form.age,
        weight_kg: form.weight_kg,
        height_cm: form.height_cm,
        allergies: form.allergies,
        dietary_preference: form.dietary_preference,
        daily_calorie_need: form.daily_calorie_need.or(estimated.map(f64::from)),
        photo,
    };

    session.initialize().await;
    let result = session.update_profile(update).await;
    display_notification(session);
    display_profile(&result?);
    Ok(())
}

/// Update name, username and email
pub async fn personal_info(
    session: &SessionManager,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
) -> Result<()> {
    session.initialize().await;
    let result = session
        .update_personal_info(PersonalInfoUpdate {
            first_name,
            last_name,
            username,
            email,
        })
        .await;
    display_notification(session);
    display_profile(&result?);
    Ok(())
}
