// ABOUTME: Client-side form checks run before any request is sent
// ABOUTME: Login, registration, personal info, password change and profile form rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::models::{Credentials, PasswordChange, PersonalInfoUpdate, RegistrationRequest};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require_filled<S: AsRef<str>>(values: &[S]) -> AppResult<()> {
    if values.iter().any(|v| is_blank(v.as_ref())) {
        return Err(AppError::validation(messages::FILL_ALL_FIELDS));
    }
    Ok(())
}

/// Username and password are both required
///
/// # Errors
///
/// Returns a validation error naming the problem
pub fn validate_credentials(credentials: &Credentials) -> AppResult<()> {
    require_filled(&[&credentials.username, &credentials.password])
}

/// Username, email, password and confirmation are required and must match
///
/// # Errors
///
/// Returns a validation error naming the problem
pub fn validate_registration(request: &RegistrationRequest) -> AppResult<()> {
    require_filled(&[
        &request.username,
        &request.email,
        &request.password,
        &request.password2,
    ])?;
    if request.password != request.password2 {
        return Err(AppError::validation(
            messages::PASSWORD_CONFIRMATION_MISMATCH,
        ));
    }
    Ok(())
}

/// Every personal information field is required
///
/// # Errors
///
/// Returns a validation error naming the problem
pub fn validate_personal_info(info: &PersonalInfoUpdate) -> AppResult<()> {
    require_filled(&[&info.first_name, &info.last_name, &info.username, &info.email])
}

/// Every field is required and the new password must equal its confirmation
///
/// # Errors
///
/// Returns a validation error naming the problem
pub fn validate_password_change(change: &PasswordChange) -> AppResult<()> {
    require_filled(&[
        &change.old_password,
        &change.new_password,
        &change.new_password2,
    ])?;
    if change.new_password != change.new_password2 {
        return Err(AppError::validation(messages::PASSWORDS_DO_NOT_MATCH));
    }
    Ok(())
}

/// Profile completion requires age, weight and height, all positive
///
/// # Errors
///
/// Returns a validation error naming the problem
pub fn validate_profile_form(
    age: Option<u32>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
) -> AppResult<()> {
    let (Some(age), Some(weight), Some(height)) = (age, weight_kg, height_cm) else {
        return Err(AppError::validation(messages::PROFILE_FIELDS_REQUIRED));
    };
    if age == 0 || weight <= 0.0 || height <= 0.0 || !weight.is_finite() || !height.is_finite() {
        return Err(AppError::validation(messages::PROFILE_VALUES_POSITIVE));
    }
    Ok(())
}
