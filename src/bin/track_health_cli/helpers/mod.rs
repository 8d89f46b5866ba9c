// ABOUTME: Helper modules for the track-health CLI
// ABOUTME: Output formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
