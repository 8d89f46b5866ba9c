// ABOUTME: Session lifecycle: who is logged in, persisted credentials and notifications
// ABOUTME: SessionManager, its observable state and the single-slot notification center
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session manager and state
pub mod manager;
/// Failure message extraction from backend payloads
pub mod messages;
/// Auto-dismissing notification slot
pub mod notification;

pub use manager::{SessionManager, SessionState};
pub use notification::NotificationCenter;
