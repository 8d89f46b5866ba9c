// ABOUTME: Nutrition commands for the track-health CLI
// ABOUTME: Fruit photo analysis, daily message and the calorie need estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use std::path::Path;
use track_health::http::ApiClient;
use track_health::nutrition;

use crate::helpers::display::{display_analysis, display_daily_message};

/// Upload a photo to the analyzer
pub async fn analyze(api: &ApiClient, image: &Path) -> Result<()> {
    let photo = nutrition::load_photo(image).await?;
    let analysis = nutrition::analyze_fruit(api, photo).await?;
    display_analysis(&analysis);
    Ok(())
}

/// Print today's message
pub async fn daily_message(api: &ApiClient) -> Result<()> {
    let message = nutrition::daily_message(api).await?;
    display_daily_message(&message);
    Ok(())
}

/// Print the estimated daily calorie need
pub fn calories(age: u32, weight_kg: f64, height_cm: f64) -> Result<()> {
    let Some(calories) = nutrition::estimate_daily_calories(age, weight_kg, height_cm) else {
        bail!("Age, weight and height must all be positive");
    };
    println!("Estimated daily need: {calories} kcal/day");
    Ok(())
}
