// ABOUTME: Session manager owning the authentication state of the running client
// ABOUTME: Login, registration, logout, profile updates, restart recovery and the 401 listener
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Manager
//!
//! One [`SessionManager`] exists per running client. It is cheap to clone and
//! every clone drives the same state. Operations never panic and never leak
//! raw transport errors: every failure becomes an [`AppError`] whose message
//! is the text shown to the user, and every operation ends with a
//! notification.
//!
//! Persisted layout (see [`crate::constants::storage_keys`]): the access and
//! refresh tokens are stored as plain strings, the profile snapshot as JSON.

use super::messages;
use super::notification::NotificationCenter;
use crate::config::environment::ClientConfig;
use crate::constants::messages as text;
use crate::constants::storage_keys::{ACCESS_TOKEN, CREDENTIAL_KEYS, REFRESH_TOKEN, USER_DATA};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::http::{ApiClient, ApiError, AuthEvent};
use crate::logging::AppLogger;
use crate::models::{
    AuthResponse, Credentials, Notification, NotificationKind, PasswordChange,
    PersonalInfoUpdate, ProfileUpdate, RegistrationRequest, TokenPair, UserProfile,
};
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::validation;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, Weak};
use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Observable session state
#[derive(Clone, Default, PartialEq)]
pub struct SessionState {
    /// Logged-in user, `None` when logged out
    pub user: Option<UserProfile>,
    /// Current bearer token
    pub access_token: Option<String>,
    /// Current refresh token (stored, never exchanged)
    pub refresh_token: Option<String>,
    /// True until [`SessionManager::initialize`] has finished
    pub is_loading: bool,
    /// Transient notification slot
    pub notification: Notification,
}

impl SessionState {
    /// Whether a user is logged in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn clear_credentials(&mut self) {
        self.user = None;
        self.access_token = None;
        self.refresh_token = None;
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("user", &self.user.as_ref().map(|u| &u.username))
            .field("has_access_token", &self.access_token.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("is_loading", &self.is_loading)
            .field("notification", &self.notification)
            .finish()
    }
}

struct SessionInner {
    api: ApiClient,
    store: Arc<dyn KeyValueStore>,
    state: Arc<watch::Sender<SessionState>>,
    notifications: NotificationCenter,
    listener: Option<JoinHandle<()>>,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

/// Owner of the authentication lifecycle
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

impl SessionManager {
    /// Create a manager in the loading state; call [`Self::initialize`] next
    ///
    /// Also starts the task that wipes credentials whenever the backend
    /// answers 401 to any request made through `api`. The task lives as long
    /// as the manager; it is only started inside a tokio runtime.
    pub fn new(api: ApiClient, store: Arc<dyn KeyValueStore>, config: &ClientConfig) -> Self {
        let (sender, _) = watch::channel(SessionState {
            is_loading: true,
            ..SessionState::default()
        });
        let state = Arc::new(sender);
        let notifications = NotificationCenter::new(Arc::clone(&state), config.notification_duration);
        let events = api.events().subscribe();

        let inner = Arc::new_cyclic(|session| SessionInner {
            listener: spawn_auth_listener(events, session.clone()),
            api,
            store,
            state,
            notifications,
        });
        Self { inner }
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Watch every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Logged-in user
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user.clone()
    }

    /// Whether a user is logged in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Notification slot
    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    /// Backend client used by this session
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Restore the session persisted by a previous run
    ///
    /// Token and snapshot present: the snapshot becomes the user at once and
    /// the profile is refreshed; a refresh failure keeps the snapshot. Token
    /// without a usable snapshot: the profile is re-fetched, and credentials
    /// are wiped if that fails. No token: a stale snapshot is discarded.
    /// Loading ends in every case.
    pub async fn initialize(&self) {
        let access_token = self.read_key(ACCESS_TOKEN).await;

        match access_token {
            Some(access_token) => {
                let refresh_token = self.read_key(REFRESH_TOKEN).await;
                self.inner.state.send_modify(|state| {
                    state.access_token = Some(access_token);
                    state.refresh_token = refresh_token;
                });
                self.restore_user().await;
            }
            None => {
                if let Err(e) = self.inner.store.remove(USER_DATA).await {
                    warn!(error = %e, "Failed to discard stale profile snapshot");
                }
                self.inner.state.send_modify(SessionState::clear_credentials);
            }
        }

        self.inner.state.send_modify(|state| state.is_loading = false);
        info!(
            authenticated = self.is_authenticated(),
            "Session initialized"
        );
    }

    async fn restore_user(&self) {
        let snapshot = load_json::<UserProfile>(self.inner.store.as_ref(), USER_DATA).await;

        match snapshot {
            Ok(Some(profile)) => {
                self.inner
                    .state
                    .send_modify(|state| state.user = Some(profile));
                if let Err(e) = self.refresh_profile().await {
                    warn!(error = %e, "Profile refresh failed, keeping cached snapshot");
                }
            }
            Ok(None) | Err(_) => {
                if let Err(e) = &snapshot {
                    warn!(error = %e, "Cached profile snapshot is unreadable");
                }
                if let Err(e) = self.refresh_profile().await {
                    warn!(error = %e, "Cannot recover profile for stored token, wiping credentials");
                    self.wipe_credentials().await;
                }
            }
        }
    }

    /// Authenticate with username and password
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty fields, otherwise an error whose
    /// message is the backend's `error` or `detail` text or the generic
    /// connection error message
    pub async fn login(&self, credentials: Credentials) -> AppResult<UserProfile> {
        if let Err(e) = validation::validate_credentials(&credentials) {
            self.inner.notifications.error(e.message.clone());
            return Err(e);
        }

        let response = match self.inner.api.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                let message = messages::login_failure(&e);
                return Err(self.fail_auth(&credentials.username, "login", message, e));
            }
        };

        self.complete_authentication(
            &credentials.username,
            AuthFlow {
                event: "login",
                success_message: text::LOGIN_SUCCESS,
                generic_failure: text::LOGIN_FAILED,
                failure_message: messages::login_failure,
            },
            response,
        )
        .await
    }

    /// Create an account and log it in
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty or mismatched fields, otherwise
    /// an error carrying the most relevant backend field error
    pub async fn register(&self, request: RegistrationRequest) -> AppResult<UserProfile> {
        if let Err(e) = validation::validate_registration(&request) {
            self.inner.notifications.error(e.message.clone());
            return Err(e);
        }

        let response = match self.inner.api.register(&request).await {
            Ok(response) => response,
            Err(e) => {
                let message = messages::registration_failure(&e);
                return Err(self.fail_auth(&request.username, "register", message, e));
            }
        };

        self.complete_authentication(
            &request.username,
            AuthFlow {
                event: "register",
                success_message: text::REGISTER_SUCCESS,
                generic_failure: text::REGISTER_FAILED,
                failure_message: messages::registration_failure,
            },
            response,
        )
        .await
    }

    /// Persist the issued tokens, then fetch, persist and publish the profile
    ///
    /// Success is only reported once every step is stored; any failure rolls
    /// the tokens back out of storage and state.
    async fn complete_authentication(
        &self,
        username: &str,
        flow: AuthFlow,
        response: AuthResponse,
    ) -> AppResult<UserProfile> {
        let TokenPair { access, refresh } = response.tokens;
        if let Err(e) = self.persist_tokens(&access, &refresh).await {
            warn!(error = %e, "Failed to persist tokens after {}", flow.event);
            self.roll_back_credentials().await;
            return Err(self.fail_local(username, flow.event, flow.generic_failure, e));
        }
        self.inner.state.send_modify(|state| {
            state.access_token = Some(access);
            state.refresh_token = Some(refresh);
        });

        let profile = match self.inner.api.get_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Profile fetch after {} failed, rolling back credentials", flow.event);
                self.roll_back_credentials().await;
                let message = (flow.failure_message)(&e);
                return Err(self.fail_auth(username, flow.event, message, e));
            }
        };

        if let Err(e) = self.commit_user(&profile).await {
            warn!(error = %e, "Cannot keep the profile after {}, rolling back credentials", flow.event);
            self.roll_back_credentials().await;
            return Err(self.fail_local(username, flow.event, flow.generic_failure, e));
        }

        AppLogger::log_auth_event(username, flow.event, true, None);
        self.inner.notifications.success(flow.success_message);
        Ok(profile)
    }

    async fn roll_back_credentials(&self) {
        self.clear_persisted_credentials().await;
        self.inner.state.send_modify(SessionState::clear_credentials);
    }

    async fn persist_tokens(&self, access: &str, refresh: &str) -> AppResult<()> {
        self.inner.store.set(ACCESS_TOKEN, access).await?;
        self.inner.store.set(REFRESH_TOKEN, refresh).await
    }

    fn fail_auth(&self, username: &str, event: &str, message: String, error: ApiError) -> AppError {
        AppLogger::log_auth_event(username, event, false, Some(&error.to_string()));
        self.inner.notifications.error(message.clone());
        classify(error, message, ErrorCode::AuthInvalid)
    }

    /// Local failure after the backend accepted the credentials
    fn fail_local(&self, username: &str, event: &str, message: &str, error: AppError) -> AppError {
        AppLogger::log_auth_event(username, event, false, Some(&error.to_string()));
        self.inner.notifications.error(message);
        AppError::new(error.code, message).with_source(error)
    }

    /// Forget the logged-in user; never fails
    ///
    /// Each persisted credential entry is removed independently, a failed
    /// removal is logged and does not stop the others.
    pub async fn logout(&self) {
        let username = self
            .current_user()
            .map(|user| user.username)
            .unwrap_or_default();

        self.clear_persisted_credentials().await;
        self.inner.state.send_modify(SessionState::clear_credentials);

        AppLogger::log_auth_event(&username, "logout", true, None);
        self.inner.notifications.success(text::LOGOUT_SUCCESS);
    }

    async fn clear_persisted_credentials(&self) {
        for key in CREDENTIAL_KEYS {
            if let Err(e) = self.inner.store.remove(key).await {
                warn!(key, error = %e, "Failed to remove persisted credential");
            }
        }
    }

    /// Fetch the profile from the backend, persist it and make it the user
    ///
    /// # Errors
    ///
    /// Returns the backend failure; the current user is left untouched
    pub async fn refresh_profile(&self) -> AppResult<UserProfile> {
        let profile = self.inner.api.get_profile().await?;
        self.commit_user(&profile).await?;
        Ok(profile)
    }

    /// Persist `profile` as the snapshot, then publish it as the user
    ///
    /// Publishing only happens while an access token is held. If the
    /// credentials were wiped meanwhile the snapshot is removed again and the
    /// session is reported as expired.
    async fn commit_user(&self, profile: &UserProfile) -> AppResult<()> {
        save_json(self.inner.store.as_ref(), USER_DATA, profile)
            .await
            .map_err(|e| AppError::storage("cannot persist the profile snapshot").with_source(e))?;

        let published = profile.clone();
        let committed = self.inner.state.send_if_modified(move |state| {
            if state.access_token.is_none() {
                return false;
            }
            state.user = Some(published);
            true
        });
        if committed {
            return Ok(());
        }

        if let Err(e) = self.inner.store.remove(USER_DATA).await {
            warn!(error = %e, "Failed to discard profile snapshot of an expired session");
        }
        Err(AppError::session_expired(text::SESSION_EXPIRED))
    }

    /// `PUT /profile/` then shallow-merge the returned `user` object
    ///
    /// # Errors
    ///
    /// Returns an error with the generic profile update message
    pub async fn update_profile(&self, update: ProfileUpdate) -> AppResult<UserProfile> {
        match self.inner.api.update_profile(&update).await {
            Ok(body) => {
                self.apply_user_patch(&body, text::PROFILE_UPDATED, text::PROFILE_UPDATE_FAILED)
                    .await
            }
            Err(e) => {
                let message = messages::profile_update_failure(&e);
                Err(self.fail_update(message, e))
            }
        }
    }

    /// `PUT /profile/personal-info/` then shallow-merge the returned `user` object
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty fields, otherwise an error with the
    /// backend `message`, a field error or the generic message
    pub async fn update_personal_info(&self, info: PersonalInfoUpdate) -> AppResult<UserProfile> {
        if let Err(e) = validation::validate_personal_info(&info) {
            self.inner.notifications.error(e.message.clone());
            return Err(e);
        }

        match self.inner.api.update_personal_info(&info).await {
            Ok(body) => {
                self.apply_user_patch(
                    &body,
                    text::PERSONAL_INFO_UPDATED,
                    text::PERSONAL_INFO_UPDATE_FAILED,
                )
                .await
            }
            Err(e) => {
                let message = messages::personal_info_failure(&e);
                Err(self.fail_update(message, e))
            }
        }
    }

    /// `POST /change-password/`; the user state is not touched
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty or mismatched fields, otherwise an
    /// error with the backend `error`, a field error or the generic message
    pub async fn change_password(&self, change: PasswordChange) -> AppResult<()> {
        if let Err(e) = validation::validate_password_change(&change) {
            self.inner.notifications.error(e.message.clone());
            return Err(e);
        }

        match self.inner.api.change_password(&change).await {
            Ok(_) => {
                self.inner.notifications.success(text::PASSWORD_CHANGED);
                Ok(())
            }
            Err(e) => {
                let message = messages::password_change_failure(&e);
                Err(self.fail_update(message, e))
            }
        }
    }

    fn fail_update(&self, message: String, error: ApiError) -> AppError {
        warn!(error = %error, "Session update failed");
        self.inner.notifications.error(message.clone());
        classify(error, message, ErrorCode::ValidationFailed)
    }

    /// Merge `body.user` into the current user, persist, then publish
    async fn apply_user_patch(
        &self,
        body: &Value,
        success_message: &str,
        failure_message: &str,
    ) -> AppResult<UserProfile> {
        let patch = match body.get("user") {
            Some(user @ Value::Object(_)) => user.clone(),
            _ => Value::Object(Map::new()),
        };

        let current = {
            let state = self.inner.state.borrow();
            state.access_token.as_ref().and(state.user.clone())
        };
        let Some(current) = current else {
            warn!("Profile update answered after the session ended, discarding it");
            self.inner.notifications.error(text::SESSION_EXPIRED);
            return Err(AppError::session_expired(text::SESSION_EXPIRED));
        };

        let merged = match current.merge_from(&patch) {
            Ok(merged) => merged,
            Err(e) => {
                warn!(error = %e, "Returned user does not fit the profile model");
                self.inner.notifications.error(failure_message);
                return Err(AppError::new(e.code, failure_message).with_source(e));
            }
        };

        if let Err(e) = self.commit_user(&merged).await {
            warn!(error = %e, "Failed to keep merged profile");
            let message = if e.code == ErrorCode::SessionExpired {
                text::SESSION_EXPIRED
            } else {
                failure_message
            };
            self.inner.notifications.error(message);
            return Err(AppError::new(e.code, message).with_source(e));
        }

        self.inner.notifications.success(success_message);
        Ok(merged)
    }

    /// React to a 401 observed on `path`
    ///
    /// Credentials are wiped only if the rejected token is still the stored
    /// one, so a late event cannot log out a newer login.
    pub async fn handle_unauthorized(&self, rejected_token: Option<&str>, path: &str) {
        let stored = match self.inner.store.get(ACCESS_TOKEN).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Cannot read stored token, wiping credentials");
                self.wipe_credentials().await;
                return;
            }
        };

        if stored.as_deref() != rejected_token {
            debug!(path, "Ignoring 401 for a token that is no longer current");
            return;
        }

        info!(path, "Backend rejected credentials, wiping session");
        self.wipe_credentials().await;
    }

    async fn wipe_credentials(&self) {
        let username = self.current_user().map(|user| user.username);

        if let Err(e) = self.inner.store.remove_many(&CREDENTIAL_KEYS).await {
            warn!(error = %e, "Bulk credential removal failed, removing keys one by one");
            self.clear_persisted_credentials().await;
        }
        self.inner.state.send_modify(SessionState::clear_credentials);

        if let Some(username) = username {
            AppLogger::log_auth_event(&username, "session_expired", false, None);
            self.inner
                .notifications
                .show(text::SESSION_EXPIRED, NotificationKind::Warning);
        }
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.inner.store.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "Failed to read persisted value");
                None
            }
        }
    }
}

/// Per-operation wording of login and registration
struct AuthFlow {
    event: &'static str,
    success_message: &'static str,
    generic_failure: &'static str,
    failure_message: fn(&ApiError) -> String,
}

/// Wipe credentials on every 401 published by the client
///
/// Holds only a weak reference, so the task never keeps a session alive.
fn spawn_auth_listener(
    mut events: broadcast::Receiver<AuthEvent>,
    session: Weak<SessionInner>,
) -> Option<JoinHandle<()>> {
    let Ok(runtime) = Handle::try_current() else {
        warn!("No tokio runtime, 401 responses will not end the session");
        return None;
    };

    Some(runtime.spawn(async move {
        loop {
            match events.recv().await {
                Ok(AuthEvent::Unauthorized {
                    rejected_token,
                    path,
                }) => {
                    let Some(inner) = session.upgrade() else {
                        break;
                    };
                    SessionManager { inner }
                        .handle_unauthorized(rejected_token.as_deref(), &path)
                        .await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Auth listener lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!("Auth event listener stopped");
    }))
}

/// Map an HTTP failure to a user-facing error
fn classify(error: ApiError, message: String, rejected_code: ErrorCode) -> AppError {
    let code = match &error {
        ApiError::Transport(_) => ErrorCode::NetworkError,
        e if e.is_unauthorized() && rejected_code != ErrorCode::AuthInvalid => {
            ErrorCode::SessionExpired
        }
        ApiError::Status { status, .. } if status.is_client_error() => rejected_code,
        ApiError::Status { .. } => ErrorCode::ExternalServiceError,
        ApiError::Decode(_) => ErrorCode::SerializationError,
        ApiError::Url(_) => ErrorCode::ConfigError,
        ApiError::Request(_) => ErrorCode::ValidationFailed,
    };
    AppError::new(code, message).with_source(error)
}
