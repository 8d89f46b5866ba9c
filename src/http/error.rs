// ABOUTME: Error type of the HTTP layer, kept close to the wire
// ABOUTME: Transport, status with JSON payload, decode and token storage failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response received (connect failure, timeout, DNS)
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned {status}")]
    Status {
        /// HTTP status
        status: StatusCode,
        /// Response body when it was JSON
        body: Option<Value>,
    },

    /// A success response could not be decoded
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The endpoint URL could not be built
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// Local input could not be turned into a request
    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    /// Whether the backend answered 401
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Whether no response was received
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Response status, if a response was received
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// JSON error payload, if the backend sent one
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> Self {
        let message = error.to_string();
        let mapped = match &error {
            ApiError::Transport(_) => Self::network(message),
            ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                Self::session_expired(message)
            }
            ApiError::Status { status, .. } if status.is_client_error() => {
                Self::validation(message)
            }
            ApiError::Status { .. } => Self::external_service(message),
            ApiError::Decode(_) => Self::serialization(message),
            ApiError::Url(_) => Self::config(message),
            ApiError::Request(_) => Self::validation(message),
        };
        mapped.with_source(error)
    }
}
