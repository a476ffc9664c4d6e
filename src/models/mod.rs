// ABOUTME: Data model module organization for the Strive server
// ABOUTME: Re-exports goal entities and their request/validation types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Core data models
//!
//! The goal entity and everything persisted with it live here. Derived
//! values (`progress_percentage`, day counts, overdue) are methods over
//! the entity, computed on read and never stored.

/// Goal entity, enums, ledger types, and request validation
pub mod goal;

pub use goal::{
    Category, CreateGoalRequest, GoalRecord, GoalStatus, GoalType, Milestone, Priority,
    ProgressEntry, ReminderFrequency, Reminders, Streak, UpdateGoalRequest,
};
