// ABOUTME: Account commands for the track-health CLI
// ABOUTME: Login, registration, logout and password change through the session manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use track_health::models::{Credentials, PasswordChange, RegistrationRequest};
use track_health::session::SessionManager;

use crate::helpers::display::{display_notification, display_profile};

/// Log in and print the profile
pub async fn login(session: &SessionManager, username: String, password: String) -> Result<()> {
    let result = session.login(Credentials::new(username, password)).await;
    display_notification(session);
    display_profile(&result?);
    Ok(())
}

/// Register and print the new profile
pub async fn register(
    session: &SessionManager,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
    password2: String,
) -> Result<()> {
    let request = RegistrationRequest {
        username,
        email,
        first_name,
        last_name,
        password,
        password2,
    };
    let result = session.register(request).await;
    display_notification(session);
    display_profile(&result?);
    Ok(())
}

/// Forget the stored session
pub async fn logout(session: &SessionManager) -> Result<()> {
    session.logout().await;
    display_notification(session);
    Ok(())
}

/// Change the account password
pub async fn change_password(
    session: &SessionManager,
    old_password: String,
    new_password: String,
    new_password2: String,
) -> Result<()> {
    session.initialize().await;
    let result = session
        .change_password(PasswordChange {
            old_password,
            new_password,
            new_password2,
        })
        .await;
    display_notification(session);
    Ok(result?)
}
