// ABOUTME: Configuration module for the client runtime settings
// ABOUTME: Exposes environment-driven configuration and the deployment environment helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: client configuration loaded from environment variables

/// Environment-driven client configuration
pub mod environment;

pub use environment::{ClientConfig, Environment};
