// ABOUTME: In-memory goal store backed by a concurrent map
// ABOUTME: Used by tests and ephemeral development runs; no durability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! In-memory storage backend
//!
//! Documents live in a sharded concurrent map; the per-entry lock taken
//! by `get_mut` makes the version check and replacement in
//! `update_atomic` a single atomic step.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::GoalRecord;
use crate::pagination::{Page, PaginationParams};

use super::{GoalFilter, GoalStore, ScanWindow, VersionedGoal};

/// Stored entry: document plus its version counter
#[derive(Debug, Clone)]
struct StoredGoal {
    record: GoalRecord,
    version: i64,
}

/// Concurrent in-memory implementation of [`GoalStore`]
#[derive(Debug, Default)]
pub struct InMemoryGoalStore {
    goals: DashMap<Uuid, StoredGoal>,
}

impl InMemoryGoalStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored goals, across all owners
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the store holds no goals
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

#[async_trait]
impl GoalStore for InMemoryGoalStore {
    async fn insert(&self, record: &GoalRecord) -> AppResult<()> {
        self.goals.insert(
            record.id,
            StoredGoal {
                record: record.clone(),
                version: 1,
            },
        );
        Ok(())
    }

    async fn find_one(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<Option<VersionedGoal>> {
        Ok(self.goals.get(&goal_id).and_then(|entry| {
            (entry.record.owner_id == owner_id).then(|| VersionedGoal {
                record: entry.record.clone(),
                version: entry.version,
            })
        }))
    }

    async fn find_many(
        &self,
        owner_id: Uuid,
        filter: &GoalFilter,
        pagination: PaginationParams,
    ) -> AppResult<Page<GoalRecord>> {
        let mut matching: Vec<GoalRecord> = self
            .goals
            .iter()
            .filter(|entry| entry.record.owner_id == owner_id && filter.matches(&entry.record))
            .map(|entry| entry.record.clone())
            .collect();

        // Newest first; id tie-break keeps paging deterministic
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(pagination.skip()).unwrap_or(usize::MAX))
            .take(pagination.limit as usize)
            .collect();

        Ok(Page { items, total })
    }

    async fn update_atomic(
        &self,
        goal_id: Uuid,
        record: &GoalRecord,
        expected_version: i64,
    ) -> AppResult<()> {
        let Some(mut entry) = self.goals.get_mut(&goal_id) else {
            return Err(AppError::not_found(format!("Goal {goal_id}")));
        };

        if entry.version != expected_version {
            return Err(AppError::conflict(format!("Goal {goal_id}")));
        }

        entry.record = record.clone();
        entry.version += 1;
        Ok(())
    }

    async fn delete(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<bool> {
        Ok(self
            .goals
            .remove_if(&goal_id, |_, stored| stored.record.owner_id == owner_id)
            .is_some())
    }

    async fn scan(&self, window: &ScanWindow) -> AppResult<Vec<GoalRecord>> {
        Ok(self
            .goals
            .iter()
            .filter(|entry| window.contains(entry.record.created_at))
            .map(|entry| entry.record.clone())
            .collect())
    }
}
