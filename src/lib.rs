// ABOUTME: Main library entry point for the Strive fitness tracking platform
// ABOUTME: Goal tracking, progress aggregation, and analytics over pluggable storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

#![deny(unsafe_code)]

//! # Strive Server
//!
//! Goal tracking and progress analytics for a personal fitness tracker.
//! Users create measurable goals, append dated progress observations,
//! and view aggregated statistics; administrators get cross-user
//! rollups.
//!
//! ## Architecture
//!
//! - **Models**: the goal document, its ledger, and request validation
//! - **Goals**: lifecycle transitions, streak tracking, and the
//!   owner-scoped service layer
//! - **Storage**: pluggable persistence behind the `GoalStore` trait
//!   (SQLite and in-memory backends)
//! - **Analytics**: read-only cross-user aggregation
//! - **Routes**: the REST surface over axum
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use strive_server::config::ServerConfig;
//! use strive_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     // Load configuration from the environment
//!     let config = ServerConfig::from_env()?;
//!     println!("Strive server configured: {}", config.summary());
//!     Ok(())
//! }
//! ```

/// Read-only cross-user analytics aggregation
pub mod analytics;

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Dependency injection context for the route layer
pub mod context;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Goal domain logic: lifecycle, streak, and the use-case service
pub mod goals;

/// Structured logging configuration
pub mod logging;

/// Core data models
pub mod models;

/// Offset pagination for list endpoints
pub mod pagination;

/// HTTP route handlers
pub mod routes;

/// Storage abstraction with pluggable backends
pub mod storage;
