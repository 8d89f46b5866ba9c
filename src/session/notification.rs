// ABOUTME: Single-slot notification shown after each session operation
// ABOUTME: A new notification replaces the visible one; stale dismiss timers are ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::manager::SessionState;
use crate::models::{Notification, NotificationKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Notification slot of a session
///
/// The slot lives inside the session state so subscribers see notifications
/// alongside user changes. Each `show` bumps a generation counter; a dismiss
/// timer only hides the notification it was started for.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    state: Arc<watch::Sender<SessionState>>,
    generation: Arc<AtomicU64>,
    duration: Duration,
}

impl NotificationCenter {
    pub(crate) fn new(state: Arc<watch::Sender<SessionState>>, duration: Duration) -> Self {
        Self {
            state,
            generation: Arc::new(AtomicU64::new(0)),
            duration,
        }
    }

    /// Show `message`, replacing whatever is visible, and schedule its dismissal
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let notification = Notification::shown(message, kind);
        debug!(kind = %kind, message = %notification.message, "Notification shown");
        self.state.send_modify(|state| state.notification = notification);

        let state = Arc::downgrade(&self.state);
        let counter = Arc::clone(&self.generation);
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            state.send_if_modified(|state| {
                if counter.load(Ordering::SeqCst) != generation || !state.notification.visible {
                    return false;
                }
                state.notification = Notification::hidden();
                true
            });
        });
    }

    /// Success notification
    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    /// Error notification
    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    /// Hide immediately and cancel the pending timer
    pub fn dismiss(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|state| {
            if state.notification.visible {
                state.notification = Notification::hidden();
                true
            } else {
                false
            }
        });
    }

    /// Current notification
    #[must_use]
    pub fn current(&self) -> Notification {
        self.state.borrow().notification.clone()
    }

    /// Watch the session state the notification slot lives in
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// How long a notification stays visible
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}
