// ABOUTME: Goal status transitions as a pure function of ledger appends
// ABOUTME: The only automatic transition is active -> completed on reaching target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Goal lifecycle
//!
//! `status` is derived from the ledger and target at append time. Pause,
//! cancel, and reactivate are explicit owner edits handled by the
//! service's update path, never derived here.

use crate::models::{GoalRecord, GoalStatus, ProgressEntry};

/// Apply a new ledger entry to a goal, running the status transition
///
/// Invariant on exit: `current` equals the value of the most recently
/// appended entry. A single append may jump `current` arbitrarily far
/// past `target`; only the percentage display clamps.
pub fn apply_progress(goal: &mut GoalRecord, entry: ProgressEntry) {
    if goal.status == GoalStatus::Active && entry.value >= goal.target {
        goal.status = GoalStatus::Completed;
    }
    goal.current = entry.value;
    goal.updated_at = entry.date;
    goal.progress.push(entry);
}
