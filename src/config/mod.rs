// ABOUTME: Configuration module organization for the Strive server
// ABOUTME: Environment-only configuration, no file-based config layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Configuration management
//!
//! Configuration is environment-only; defaults live in
//! [`crate::constants::defaults`].

/// Environment-based runtime configuration
pub mod environment;

pub use environment::{DatabaseConfig, Environment, ServerConfig};
