// ABOUTME: HTTP client for the nutrition backend with bearer token attachment
// ABOUTME: Reads the persisted token per request and publishes an auth event on every 401
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ApiError;
use super::events::{AuthEvent, AuthEvents};
use crate::config::environment::ClientConfig;
use crate::constants::defaults::{REQUEST_ID_HEADER, USER_AGENT};
use crate::constants::endpoints;
use crate::constants::storage_keys::ACCESS_TOKEN;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    AuthResponse, Credentials, DailyMessage, FruitAnalysis, PasswordChange, PersonalInfoUpdate,
    PhotoUpload, ProfileUpdate, RegistrationRequest, UserProfile,
};
use crate::storage::KeyValueStore;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use url::Url;
use uuid::Uuid;

/// Body of an outgoing request
enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Client for every backend endpoint
///
/// The access token is read from the store on each request, so a login or a
/// wipe is observed by the very next call. A 401 answer is published on
/// [`ApiClient::events`] before the error is returned to the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    store: Arc<dyn KeyValueStore>,
    events: AuthEvents,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the underlying HTTP client cannot be built
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let http = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::config("cannot build the HTTP client").with_source(e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            store,
            events: AuthEvents::default(),
        })
    }

    /// Auth event channel
    #[must_use]
    pub const fn events(&self) -> &AuthEvents {
        &self.events
    }

    /// Configured backend base URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /register/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn register(&self, request: &RegistrationRequest) -> Result<AuthResponse, ApiError> {
        let body = encode(request)?;
        let value = self
            .execute(Method::POST, endpoints::REGISTER, RequestBody::Json(body))
            .await?;
        decode(value)
    }

    /// `POST /login/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let body = encode(credentials)?;
        let value = self
            .execute(Method::POST, endpoints::LOGIN, RequestBody::Json(body))
            .await?;
        decode(value)
    }

    /// `GET /profile/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        let value = self
            .execute(Method::GET, endpoints::PROFILE, RequestBody::Empty)
            .await?;
        decode(value)
    }

    /// `PUT /profile/`, multipart when a photo is attached
    ///
    /// Returns the raw response body; its `user` object is the merge patch.
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value, ApiError> {
        let body = match &update.photo {
            Some(photo) => {
                let form = update
                    .form_fields()
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                RequestBody::Multipart(form.part("photo", photo_part(photo.clone())?))
            }
            None => RequestBody::Json(encode(update)?),
        };
        self.execute(Method::PUT, endpoints::PROFILE, body).await
    }

    /// `PUT /profile/personal-info/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn update_personal_info(
        &self,
        info: &PersonalInfoUpdate,
    ) -> Result<Value, ApiError> {
        let body = encode(info)?;
        self.execute(Method::PUT, endpoints::PERSONAL_INFO, RequestBody::Json(body))
            .await
    }

    /// `POST /change-password/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn change_password(&self, change: &PasswordChange) -> Result<Value, ApiError> {
        let body = encode(change)?;
        self.execute(
            Method::POST,
            endpoints::CHANGE_PASSWORD,
            RequestBody::Json(body),
        )
        .await
    }

    /// `POST /predict/` with the image in the multipart field `photo`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn predict(&self, photo: PhotoUpload) -> Result<FruitAnalysis, ApiError> {
        let form = Form::new().part("photo", photo_part(photo)?);
        let value = self
            .execute(Method::POST, endpoints::PREDICT, RequestBody::Multipart(form))
            .await?;
        decode(value)
    }

    /// `GET /daily-message/`
    ///
    /// # Errors
    ///
    /// Returns the transport, status or decode failure of the call
    pub async fn daily_message(&self) -> Result<DailyMessage, ApiError> {
        let value = self
            .execute(Method::GET, endpoints::DAILY_MESSAGE, RequestBody::Empty)
            .await?;
        decode(value)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    async fn stored_token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Cannot read the stored access token, sending unauthenticated");
                None
            }
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(path)?;
        let token = self.stored_token().await;
        let request_id = Uuid::new_v4().to_string();

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request.json(&json),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    http.method = %method,
                    http.path = %path,
                    http.request_id = %request_id,
                    error = %e,
                    "HTTP request failed without a response"
                );
                return Err(ApiError::Transport(e));
            }
        };
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::Transport)?;

        AppLogger::log_api_request(
            method.as_str(),
            path,
            status.as_u16(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            &request_id,
            token.is_some(),
        );

        if status == StatusCode::UNAUTHORIZED {
            self.events.publish(AuthEvent::Unauthorized {
                rejected_token: token,
                path: path.to_owned(),
            });
        }

        if !status.is_success() {
            let body = serde_json::from_slice(&bytes).ok();
            return Err(ApiError::Status { status, body });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Request(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::Decode)
}

fn photo_part(photo: PhotoUpload) -> Result<Part, ApiError> {
    Part::bytes(photo.bytes)
        .file_name(photo.file_name)
        .mime_str(&photo.mime_type)
        .map_err(|e| ApiError::Request(format!("invalid image type: {e}")))
}
