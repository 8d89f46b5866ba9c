// ABOUTME: Auth events published by the HTTP client and consumed by the session listener
// ABOUTME: Broadcast channel; publishing never waits for or requires a subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults::AUTH_EVENT_CHANNEL_SIZE;
use std::fmt;
use tokio::sync::broadcast;
use tracing::debug;

/// Authentication-relevant outcome observed on the wire
#[derive(Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// The backend answered 401
    Unauthorized {
        /// Bearer token sent with the rejected request, `None` if unauthenticated
        rejected_token: Option<String>,
        /// Endpoint path of the rejected request
        path: String,
    },
}

impl fmt::Debug for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized {
                rejected_token,
                path,
            } => f
                .debug_struct("Unauthorized")
                .field("authenticated", &rejected_token.is_some())
                .field("path", path)
                .finish(),
        }
    }
}

/// Sending half of the auth event channel, cheap to clone
#[derive(Debug, Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthEvent>,
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new(AUTH_EVENT_CHANNEL_SIZE)
    }
}

impl AuthEvents {
    /// Channel buffering up to `capacity` events per lagging subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish without waiting; an event with no subscriber is dropped
    pub fn publish(&self, event: AuthEvent) {
        if self.sender.send(event).is_err() {
            debug!("Auth event dropped, no subscriber");
        }
    }

    /// New receiver observing events published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
