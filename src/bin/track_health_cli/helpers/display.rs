// ABOUTME: Output formatting helpers for the track-health CLI
// ABOUTME: Consistent display of notifications, profiles, favorites and analysis results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use track_health::models::{DailyMessage, FavoriteMeal, FruitAnalysis, UserProfile};
use track_health::session::SessionManager;

/// Print the session's visible notification, if any
pub fn display_notification(session: &SessionManager) {
    let notification = session.notifications().current();
    if notification.visible {
        println!("[{}] {}", notification.kind.title(), notification.message);
    }
}

/// Print a user profile
pub fn display_profile(profile: &UserProfile) {
    println!("{}", "=".repeat(50));
    println!("Hello {}!", profile.display_name());
    println!("   Username: {}", profile.username);
    println!("   Email: {}", profile.email);
    if let Some(age) = profile.age {
        println!("   Age: {age}");
    }
    if let Some(weight) = profile.weight_kg {
        println!("   Weight: {weight} kg");
    }
    if let Some(height) = profile.height_cm {
        println!("   Height: {height} cm");
    }
    if let Some(allergies) = &profile.allergies {
        println!("   Allergies: {allergies}");
    }
    if let Some(preference) = &profile.dietary_preference {
        println!("   Preference: {preference}");
    }
    if let Some(calories) = profile.daily_calorie_need {
        println!("   Daily need: {calories} kcal");
    }
    println!("{}", "=".repeat(50));
}

/// Print the favorites list
pub fn display_favorites(favorites: &[FavoriteMeal]) {
    if favorites.is_empty() {
        println!("No favorites yet");
        return;
    }
    println!("Favorites ({}):", favorites.len());
    for meal in favorites {
        match &meal.description {
            Some(description) => println!("   #{} {} - {description}", meal.id, meal.name),
            None => println!("   #{} {}", meal.id, meal.name),
        }
    }
}

/// Print a fruit analysis
pub fn display_analysis(analysis: &FruitAnalysis) {
    println!("Detected fruit: {}", analysis.fruit);
    println!("   Calories: {} kcal", analysis.calories);
    println!("   Carbs: {} g", analysis.carbs);
    println!("   Protein: {} g", analysis.protein);
}

/// Print the daily message
pub fn display_daily_message(message: &DailyMessage) {
    if let Some(title) = &message.title {
        println!("{title}");
    }
    println!("{}", message.message);
}
