// ABOUTME: Authenticated HTTP access to the nutrition backend
// ABOUTME: Bearer attachment, failure classification and auth event publication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Backend API client
pub mod client;
/// HTTP-layer error type
pub mod error;
/// Auth event channel
pub mod events;

pub use client::ApiClient;
pub use error::ApiError;
pub use events::{AuthEvent, AuthEvents};
