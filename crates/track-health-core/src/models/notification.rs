// ABOUTME: Transient user-facing notification describing the outcome of an operation
// ABOUTME: Single slot: visible flag, message, kind and the time it was shown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Operation succeeded
    #[default]
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Neutral information
    Info,
}

impl NotificationKind {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Title shown above the message
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Information",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current notification slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Whether the notification is on screen
    pub visible: bool,
    /// Message text, empty when hidden
    pub message: String,
    /// Severity
    pub kind: NotificationKind,
    /// When it was shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shown_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Visible notification stamped with the current time
    pub fn shown(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            visible: true,
            message: message.into(),
            kind,
            shown_at: Some(Utc::now()),
        }
    }

    /// Hidden, empty notification
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }
}
