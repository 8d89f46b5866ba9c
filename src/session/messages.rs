// ABOUTME: Turns backend error payloads into the user-facing failure message of each operation
// ABOUTME: Each operation has its own key priority and generic fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages;
use crate::http::ApiError;
use serde_json::Value;

/// Text of a field error value: a string, or the first string of a list
#[must_use]
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.first().and_then(field_text),
        _ => None,
    }
}

fn keyed(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).and_then(field_text)
}

/// First usable field error in payload order
///
/// Fields whose value is not a non-blank string (or a list starting with
/// one) are skipped, so `{"code": 7, "email": ["taken"]}` yields `taken`.
fn first_field_error(payload: &Value) -> Option<String> {
    payload.as_object()?.values().find_map(field_text)
}

fn from_keys(error: &ApiError, keys: &[&str], fallback_to_fields: bool) -> Option<String> {
    let payload = error.payload()?;
    keys.iter()
        .find_map(|key| keyed(payload, key))
        .or_else(|| {
            if fallback_to_fields {
                first_field_error(payload)
            } else {
                None
            }
        })
}

/// Login: `error`, then `detail`
#[must_use]
pub fn login_failure(error: &ApiError) -> String {
    from_keys(error, &["error", "detail"], false)
        .unwrap_or_else(|| messages::LOGIN_FAILED.to_owned())
}

/// Registration: `password`, `username`, `email`, then the first other field
#[must_use]
pub fn registration_failure(error: &ApiError) -> String {
    from_keys(error, &["password", "username", "email"], true)
        .unwrap_or_else(|| messages::REGISTER_FAILED.to_owned())
}

/// Personal information: `message`, then field errors
#[must_use]
pub fn personal_info_failure(error: &ApiError) -> String {
    from_keys(error, &["message"], true)
        .unwrap_or_else(|| messages::PERSONAL_INFO_UPDATE_FAILED.to_owned())
}

/// Password change: `error`, then field errors
#[must_use]
pub fn password_change_failure(error: &ApiError) -> String {
    from_keys(error, &["error"], true)
        .unwrap_or_else(|| messages::PASSWORD_CHANGE_FAILED.to_owned())
}

/// Profile update always reports the generic message
#[must_use]
pub fn profile_update_failure(_error: &ApiError) -> String {
    messages::PROFILE_UPDATE_FAILED.to_owned()
}
