// ABOUTME: Unified error type and error codes shared by every client layer
// ABOUTME: Maps transport, auth, validation and storage failures onto user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every fallible operation in the client reports an [`AppError`]. The `message`
//! field is always safe to show to the user; diagnostic detail travels in the
//! optional `source` chain and in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// Credentials were rejected by the backend
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1000,
    /// An authenticated call was answered with 401
    #[serde(rename = "SESSION_EXPIRED")]
    SessionExpired = 1001,

    // Validation (3000-3999)
    /// Client-side or field-level backend validation failed
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed = 3000,

    // External services (5000-5999)
    /// No response was received (connect failure, timeout, DNS)
    #[serde(rename = "NETWORK_ERROR")]
    NetworkError = 5000,
    /// The backend answered with a non-success status
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5001,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Local key-value storage read or write failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// JSON encoding or decoding failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Short description of the error class
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthInvalid => "Authentication failed",
            Self::SessionExpired => "Session expired",
            Self::ValidationFailed => "Validation failed",
            Self::NetworkError => "Network error",
            Self::ExternalServiceError => "Backend error",
            Self::ConfigError => "Configuration error",
            Self::InternalError => "Internal error",
            Self::StorageError => "Local storage error",
            Self::SerializationError => "Serialization error",
        }
    }

    /// Whether the failure is soft (logged, reported with a generic message)
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::NetworkError | Self::StorageError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Unified error type for the client
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// User-facing message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Credentials rejected
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Session expired (401 on an authenticated call)
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionExpired, message)
    }

    /// Validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Transport failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Backend answered with an error status
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Local storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
