// ABOUTME: Storage abstraction for goal documents with pluggable backends
// ABOUTME: SQLite for deployments, an in-memory map for tests and ephemeral runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Storage abstraction layer
//!
//! All backends implement [`GoalStore`] to give the service layer a
//! consistent interface. Writes that race on the same goal are resolved
//! with an optimistic version check: [`GoalStore::update_atomic`] only
//! applies when the caller's `expected_version` still matches, so
//! read-modify-write cycles are serialized per goal without any
//! application-level lock, even across multiple server instances.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{GoalRecord, GoalStatus, GoalType};
use crate::pagination::{Page, PaginationParams};

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryGoalStore;
pub use sqlite::SqliteGoalStore;

/// A stored goal together with its optimistic-concurrency version
#[derive(Debug, Clone)]
pub struct VersionedGoal {
    /// The goal document
    pub record: GoalRecord,
    /// Version to pass back to [`GoalStore::update_atomic`]
    pub version: i64,
}

/// Filter for owner-scoped listings
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalFilter {
    /// Restrict to a lifecycle status
    pub status: Option<GoalStatus>,
    /// Restrict to a goal type
    pub goal_type: Option<GoalType>,
}

impl GoalFilter {
    /// Whether a record passes this filter
    #[must_use]
    pub fn matches(&self, record: &GoalRecord) -> bool {
        self.status.is_none_or(|s| record.status == s)
            && self.goal_type.is_none_or(|t| record.goal_type == t)
    }
}

/// Creation-time window for analytics scans
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanWindow {
    /// Inclusive lower bound on `created_at`
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub end: Option<DateTime<Utc>>,
}

impl ScanWindow {
    /// Whether a creation timestamp falls inside the window
    #[must_use]
    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| created_at >= s) && self.end.is_none_or(|e| created_at <= e)
    }
}

/// Core storage trait for goal documents
///
/// All backends must implement this trait to provide a consistent
/// interface for the service layer.
#[async_trait]
pub trait GoalStore: Send + Sync + 'static {
    /// Persist a new goal document
    async fn insert(&self, record: &GoalRecord) -> AppResult<()>;

    /// Load a goal by id, scoped to its owner
    ///
    /// Returns `None` when the goal does not exist or is owned by
    /// someone else; callers cannot distinguish the two.
    async fn find_one(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<Option<VersionedGoal>>;

    /// List an owner's goals, newest first, with the total matching count
    async fn find_many(
        &self,
        owner_id: Uuid,
        filter: &GoalFilter,
        pagination: PaginationParams,
    ) -> AppResult<Page<GoalRecord>>;

    /// Replace a goal document if `expected_version` still matches
    ///
    /// Fails with `ConcurrentModification` when the version moved under
    /// the caller, and `ResourceNotFound` when the goal is gone.
    async fn update_atomic(
        &self,
        goal_id: Uuid,
        record: &GoalRecord,
        expected_version: i64,
    ) -> AppResult<()>;

    /// Delete a goal, scoped to its owner; `false` when nothing matched
    async fn delete(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<bool>;

    /// Read-only cross-user scan by creation window, for analytics
    async fn scan(&self, window: &ScanWindow) -> AppResult<Vec<GoalRecord>>;
}
