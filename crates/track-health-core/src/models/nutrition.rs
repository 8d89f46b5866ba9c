// ABOUTME: Nutrition payloads returned by the fruit analyzer and daily message endpoints
// ABOUTME: FruitAnalysis and DailyMessage definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of `POST /predict/` for a fruit photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitAnalysis {
    /// Recognized fruit name
    pub fruit: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Protein (g)
    pub protein: f64,
}

/// Payload of `GET /daily-message/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMessage {
    /// Message body
    pub message: String,
    /// Optional headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Any other backend fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
