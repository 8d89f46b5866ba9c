// ABOUTME: Nutrition helpers: calorie need estimate, fruit photo analysis and the daily message
// ABOUTME: The estimate is Harris-Benedict BMR times the sedentary activity factor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages;
use crate::constants::nutrition::{
    BMR_AGE_FACTOR, BMR_BASE, BMR_HEIGHT_FACTOR, BMR_WEIGHT_FACTOR, SEDENTARY_ACTIVITY_FACTOR,
};
use crate::errors::{AppError, AppResult};
use crate::http::ApiClient;
use crate::models::{DailyMessage, FruitAnalysis, PhotoUpload};
use chrono::Utc;
use std::path::Path;
use tracing::warn;

/// Daily calorie need in kcal, `None` unless every input is positive
///
/// `(88.362 + 13.397 * weight + 4.799 * height - 5.677 * age) * 1.2`, rounded.
#[must_use]
pub fn estimate_daily_calories(age: u32, weight_kg: f64, height_cm: f64) -> Option<u32> {
    if age == 0 || !weight_kg.is_finite() || !height_cm.is_finite() {
        return None;
    }
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }

    let bmr = BMR_AGE_FACTOR.mul_add(
        -f64::from(age),
        BMR_HEIGHT_FACTOR.mul_add(height_cm, BMR_WEIGHT_FACTOR.mul_add(weight_kg, BMR_BASE)),
    );
    let calories = (bmr * SEDENTARY_ACTIVITY_FACTOR).round();
    (calories > 0.0).then_some(calories as u32)
}

/// Read an image from disk into an upload
///
/// # Errors
///
/// Returns a storage error if the file cannot be read
pub async fn load_photo(path: &Path) -> AppResult<PhotoUpload> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::storage(format!("cannot read {}", path.display())).with_source(e)
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let mime_type = match extension.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "image/jpeg",
    };
    let file_name = format!(
        "fruit_analysis_{}.{}",
        Utc::now().timestamp_millis(),
        if extension.is_empty() { "jpg" } else { &extension }
    );

    Ok(PhotoUpload {
        bytes,
        file_name,
        mime_type: mime_type.to_owned(),
    })
}

/// Send a fruit photo to the analyzer
///
/// # Errors
///
/// Returns an error with the generic analysis failure message
pub async fn analyze_fruit(api: &ApiClient, photo: PhotoUpload) -> AppResult<FruitAnalysis> {
    api.predict(photo).await.map_err(|e| {
        warn!(error = %e, "Fruit analysis failed");
        let source = AppError::from(e);
        AppError::new(source.code, messages::ANALYSIS_FAILED).with_source(source)
    })
}

/// Fetch today's message
///
/// # Errors
///
/// Returns the backend failure
pub async fn daily_message(api: &ApiClient) -> AppResult<DailyMessage> {
    Ok(api.daily_message().await?)
}
