// ABOUTME: Integration tests for the session notification slot
// ABOUTME: Local validation failures notify, replace earlier messages and auto-dismiss
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{new_session, unreachable_config};
use std::time::Duration;
use track_health::constants::messages;
use track_health::models::{Credentials, NotificationKind, PasswordChange};

#[tokio::test(start_paused = true)]
async fn test_local_failure_notifies_then_dismisses() {
    let test = new_session(&unreachable_config());
    let notifications = test.session.notifications();
    let state = notifications.subscribe();

    test.session
        .login(Credentials::new("", "secret"))
        .await
        .unwrap_err();
    assert!(state.has_changed().unwrap());

    let shown = notifications.current();
    assert!(shown.visible);
    assert_eq!(shown.kind, NotificationKind::Error);
    assert_eq!(shown.message, messages::FILL_ALL_FIELDS);

    tokio::time::sleep(notifications.duration() + Duration::from_millis(1)).await;
    assert!(!notifications.current().visible);
}

#[tokio::test(start_paused = true)]
async fn test_newer_notification_outlives_older_timer() {
    let test = new_session(&unreachable_config());
    let notifications = test.session.notifications();

    test.session
        .login(Credentials::new("", ""))
        .await
        .unwrap_err();
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    test.session
        .change_password(PasswordChange {
            old_password: "old".into(),
            new_password: "new-one".into(),
            new_password2: "new-two".into(),
        })
        .await
        .unwrap_err();

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    let current = notifications.current();
    assert!(current.visible);
    assert_eq!(current.message, messages::PASSWORDS_DO_NOT_MATCH);

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert!(!notifications.current().visible);
}
