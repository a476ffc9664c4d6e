// ABOUTME: Goal domain module organization: lifecycle, streak, and use-case service
// ABOUTME: Business logic is protocol-agnostic and reusable across entry points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Goal domain logic
//!
//! Pure transition and streak functions plus the owner-scoped service
//! that orchestrates them against the storage layer. Route handlers stay
//! thin and delegate here.

/// Status transitions driven by progress appends
pub mod lifecycle;

/// Owner-scoped use-case layer
pub mod service;

/// Consecutive-day streak recomputation
pub mod streak;

pub use service::GoalService;
