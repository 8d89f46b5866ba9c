// ABOUTME: Integration tests for session restore, logout and profile updates
// ABOUTME: Restart recovery paths, shallow merge contract and password change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{logged_in, mount_profile, profile_json, session_with_store, test_config};
use serde_json::json;
use std::sync::Arc;
use track_health::constants::{messages, storage_keys};
use track_health::models::{
    NotificationKind, PasswordChange, PersonalInfoUpdate, ProfileUpdate, UserProfile,
};
use track_health::storage::memory::InMemoryStore;
use track_health::storage::KeyValueStore;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn persisted_store(with_snapshot: bool) -> Arc<InMemoryStore> {
    let mut entries = vec![
        (storage_keys::ACCESS_TOKEN.to_owned(), "stored-acc".to_owned()),
        (storage_keys::REFRESH_TOKEN.to_owned(), "stored-ref".to_owned()),
    ];
    if with_snapshot {
        entries.push((
            storage_keys::USER_DATA.to_owned(),
            profile_json(5, "cached").to_string(),
        ));
    }
    Arc::new(InMemoryStore::with_entries(entries))
}

#[tokio::test]
async fn test_initialize_restores_and_refreshes_profile() {
    let server = MockServer::start().await;
    mount_profile(&server, "stored-acc", profile_json(5, "refreshed")).await;

    let test = session_with_store(&test_config(&server.uri()), persisted_store(true));
    assert!(test.session.snapshot().is_loading);

    test.session.initialize().await;

    let state = test.session.snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.user.unwrap().username, "refreshed");
    assert_eq!(state.refresh_token.as_deref(), Some("stored-ref"));
}

#[tokio::test]
async fn test_initialize_keeps_snapshot_when_refresh_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let test = session_with_store(&test_config(&server.uri()), persisted_store(true));
    test.session.initialize().await;

    let state = test.session.snapshot();
    assert!(!state.is_loading);
    assert_eq!(state.user.unwrap().username, "cached");
    assert!(test
        .store
        .get(storage_keys::ACCESS_TOKEN)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_initialize_refetches_missing_snapshot() {
    let server = MockServer::start().await;
    mount_profile(&server, "stored-acc", profile_json(5, "amina")).await;

    let test = session_with_store(&test_config(&server.uri()), persisted_store(false));
    test.session.initialize().await;

    assert_eq!(test.session.current_user().unwrap().username, "amina");
    assert!(test
        .store
        .get(storage_keys::USER_DATA)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_initialize_wipes_token_without_recoverable_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = persisted_store(false);
    store
        .set(storage_keys::USER_DATA, "{not json")
        .await
        .unwrap();
    let test = session_with_store(&test_config(&server.uri()), store);
    test.session.initialize().await;

    let state = test.session.snapshot();
    assert!(!state.is_loading);
    assert!(state.user.is_none());
    assert!(state.access_token.is_none());
    assert!(test.store.is_empty().await);
}

#[tokio::test]
async fn test_initialize_without_token_discards_stale_snapshot() {
    let store = Arc::new(InMemoryStore::with_entries([(
        storage_keys::USER_DATA,
        profile_json(5, "ghost").to_string(),
    )]));
    let test = session_with_store(&common::unreachable_config(), store);
    test.session.initialize().await;

    assert!(test.session.current_user().is_none());
    assert!(!test.session.snapshot().is_loading);
    assert!(test.store.is_empty().await);
}

#[tokio::test]
async fn test_logout_then_initialize_yields_no_user() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;
    assert!(test.session.is_authenticated());

    test.session.logout().await;
    let state = test.session.snapshot();
    assert!(state.user.is_none());
    assert!(state.access_token.is_none());
    assert_eq!(state.notification.message, messages::LOGOUT_SUCCESS);

    let restarted = session_with_store(&test_config(&server.uri()), test.store.clone());
    restarted.session.initialize().await;
    assert!(restarted.session.current_user().is_none());
}

#[tokio::test]
async fn test_update_profile_merges_returned_user() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;

    Mock::given(method("PUT"))
        .and(path("/api/profile/"))
        .and(header("authorization", "Bearer acc-1"))
        .and(body_json(json!({"poids": 60.0, "preference": "vegan"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "updated",
            "user": {"poids": 60.0, "preference": "vegan"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = ProfileUpdate {
        weight_kg: Some(60.0),
        dietary_preference: Some("vegan".into()),
        ..ProfileUpdate::default()
    };
    let merged = test.session.update_profile(update).await.unwrap();

    assert_eq!(merged.weight_kg, Some(60.0));
    assert_eq!(merged.dietary_preference.as_deref(), Some("vegan"));
    // Absent fields keep their previous values
    assert_eq!(merged.height_cm, Some(168.0));
    assert_eq!(merged.allergies.as_deref(), Some("peanuts"));

    let persisted: UserProfile = serde_json::from_str(
        &test.store.get(storage_keys::USER_DATA).await.unwrap().unwrap(),
    )
    .unwrap();
    assert_eq!(persisted, merged);
    assert_eq!(test.session.current_user(), Some(merged));
    assert_eq!(
        test.session.notifications().current().message,
        messages::PROFILE_UPDATED
    );
}

#[tokio::test]
async fn test_update_profile_failure_is_generic() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;
    Mock::given(method("PUT"))
        .and(path("/api/profile/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"age": ["invalid"]})))
        .mount(&server)
        .await;

    let before = test.session.current_user();
    let error = test
        .session
        .update_profile(ProfileUpdate {
            age: Some(0),
            ..ProfileUpdate::default()
        })
        .await
        .unwrap_err();

    assert_eq!(error.message, messages::PROFILE_UPDATE_FAILED);
    assert_eq!(test.session.current_user(), before);
}

#[tokio::test]
async fn test_update_personal_info_reports_backend_message() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;
    Mock::given(method("PUT"))
        .and(path("/api/profile/personal-info/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Email already used"})),
        )
        .mount(&server)
        .await;

    let error = test
        .session
        .update_personal_info(PersonalInfoUpdate {
            first_name: "Amina".into(),
            last_name: "Kaci".into(),
            username: "amina".into(),
            email: "taken@example.com".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.message, "Email already used");
    assert_eq!(
        test.session.notifications().current().kind,
        NotificationKind::Error
    );
}

#[tokio::test]
async fn test_update_personal_info_merges_user() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;
    Mock::given(method("PUT"))
        .and(path("/api/profile/personal-info/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"first_name": "Nina", "email": "nina@example.com"}
        })))
        .mount(&server)
        .await;

    let merged = test
        .session
        .update_personal_info(PersonalInfoUpdate {
            first_name: "Nina".into(),
            last_name: "Kaci".into(),
            username: "amina".into(),
            email: "nina@example.com".into(),
        })
        .await
        .unwrap();

    assert_eq!(merged.first_name, "Nina");
    assert_eq!(merged.email, "nina@example.com");
    assert_eq!(merged.weight_kg, Some(61.5));
}

#[tokio::test]
async fn test_change_password_leaves_user_untouched() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;
    Mock::given(method("POST"))
        .and(path("/api/change-password/"))
        .and(body_json(json!({
            "old_password": "s3cret",
            "new_password": "n3w-s3cret",
            "new_password2": "n3w-s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let before = test.session.current_user();
    test.session
        .change_password(PasswordChange {
            old_password: "s3cret".into(),
            new_password: "n3w-s3cret".into(),
            new_password2: "n3w-s3cret".into(),
        })
        .await
        .unwrap();

    assert_eq!(test.session.current_user(), before);
    assert_eq!(
        test.session.notifications().current().message,
        messages::PASSWORD_CHANGED
    );
}

#[tokio::test]
async fn test_change_password_mismatch_short_circuits() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;
    Mock::given(method("POST"))
        .and(path("/api/change-password/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = test
        .session
        .change_password(PasswordChange {
            old_password: "s3cret".into(),
            new_password: "one".into(),
            new_password2: "two".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.message, messages::PASSWORDS_DO_NOT_MATCH);
}

#[tokio::test]
async fn test_change_password_failure_reads_error_then_fields() {
    let server = MockServer::start().await;
    let test = logged_in(&server, "amina", "acc-1").await;
    Mock::given(method("POST"))
        .and(path("/api/change-password/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"old_password": ["Current password is incorrect"]})),
        )
        .mount(&server)
        .await;

    let error = test
        .session
        .change_password(PasswordChange {
            old_password: "wrong".into(),
            new_password: "n3w".into(),
            new_password2: "n3w".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error.message, "Current password is incorrect");
}
