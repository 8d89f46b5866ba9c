// ABOUTME: Core types and constants for the Track to Health nutrition client
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Track to Health Core
//!
//! Foundation crate providing shared types and constants for the Track to Health
//! client. It carries no I/O so the session, storage and HTTP layers in the main
//! crate can depend on it without pulling a runtime.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Storage keys, endpoint paths, defaults and user-facing messages
//! - **models**: User profile, token pair, favorites, notifications, nutrition payloads

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`UserProfile`, `TokenPair`, `FavoriteMeal`, ...)
pub mod models;
