// ABOUTME: Command modules for the track-health CLI
// ABOUTME: Account, profile, favorites and nutrition commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod account;
pub mod favorites;
pub mod nutrition;
pub mod profile;
