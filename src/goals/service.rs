// ABOUTME: Owner-scoped use-case layer for goal CRUD and progress appends
// ABOUTME: Orchestrates validation, lifecycle, streak, and atomic persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Goal service
//!
//! Every operation takes an explicit, already-authenticated `owner_id`;
//! the service never reaches into ambient request state. A goal is only
//! visible and mutable through its owner's id; lookups for goals owned
//! by someone else report not-found, never permission details.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{AppError, AppResult, FieldError};
use crate::models::{CreateGoalRequest, GoalRecord, ProgressEntry, UpdateGoalRequest};
use crate::pagination::{Page, PaginationParams};
use crate::storage::{GoalFilter, GoalStore, VersionedGoal};

use super::{lifecycle, streak};

/// Use-case layer over a [`GoalStore`] backend
#[derive(Debug, Clone)]
pub struct GoalService<S> {
    store: Arc<S>,
}

impl<S: GoalStore> GoalService<S> {
    /// Create a service over the given backend
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a goal for `owner_id`
    ///
    /// # Errors
    ///
    /// Returns a validation error listing every offending field, or a
    /// storage error if the write fails.
    pub async fn create_goal(
        &self,
        owner_id: Uuid,
        request: CreateGoalRequest,
    ) -> AppResult<GoalRecord> {
        let now = Utc::now();
        let errors = request.validate(now);
        if !errors.is_empty() {
            return Err(AppError::validation(errors).with_user_id(owner_id));
        }

        let record = request.into_record(owner_id, now);
        self.store.insert(&record).await?;

        info!(
            goal_id = %record.id,
            owner_id = %owner_id,
            goal_type = record.goal_type.as_str(),
            "goal created"
        );
        Ok(record)
    }

    /// Load a single goal owned by `owner_id`
    ///
    /// # Errors
    ///
    /// Returns not-found when the goal is absent or owned by someone else.
    pub async fn get_goal(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<GoalRecord> {
        let versioned = self.load_owned(owner_id, goal_id).await?;
        Ok(versioned.record)
    }

    /// List `owner_id`'s goals, newest first
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails.
    pub async fn list_goals(
        &self,
        owner_id: Uuid,
        filter: GoalFilter,
        pagination: PaginationParams,
    ) -> AppResult<Page<GoalRecord>> {
        let page = self.store.find_many(owner_id, &filter, pagination).await?;
        debug!(
            owner_id = %owner_id,
            returned = page.items.len(),
            total = page.total,
            "goals listed"
        );
        Ok(page)
    }

    /// Apply a partial update to a goal owned by `owner_id`
    ///
    /// Changed enum fields are re-validated; the progress ledger and
    /// `current` are not updatable through this path.
    ///
    /// # Errors
    ///
    /// Returns validation, not-found, conflict, or storage errors.
    pub async fn update_goal(
        &self,
        owner_id: Uuid,
        goal_id: Uuid,
        request: UpdateGoalRequest,
    ) -> AppResult<GoalRecord> {
        let errors = request.validate();
        if !errors.is_empty() {
            return Err(AppError::validation(errors).with_user_id(owner_id));
        }

        let VersionedGoal {
            mut record,
            version,
        } = self.load_owned(owner_id, goal_id).await?;

        request.apply(&mut record, Utc::now());
        self.store.update_atomic(goal_id, &record, version).await?;

        info!(goal_id = %goal_id, owner_id = %owner_id, "goal updated");
        Ok(record)
    }

    /// Append a progress observation dated now
    ///
    /// Runs the lifecycle transition and, for streak-requiring goals,
    /// the streak recomputation; ledger, status, and streak are
    /// persisted as one atomic document write.
    ///
    /// # Errors
    ///
    /// Returns not-found when the goal is absent or not owned, a
    /// conflict when a concurrent append won the version race (retry
    /// the single append), or a storage error.
    pub async fn append_progress(
        &self,
        owner_id: Uuid,
        goal_id: Uuid,
        value: f64,
        notes: Option<String>,
    ) -> AppResult<GoalRecord> {
        if !value.is_finite() {
            return Err(AppError::validation(vec![FieldError::new(
                "value",
                "value must be a finite number",
            )]));
        }

        let VersionedGoal {
            mut record,
            version,
        } = self.load_owned(owner_id, goal_id).await?;

        let now = Utc::now();
        let status_at_append = record.status;
        let previous_date = record.last_progress_date();

        lifecycle::apply_progress(
            &mut record,
            ProgressEntry {
                date: now,
                value,
                notes,
            },
        );

        if let Some(streak_state) = record.streak.as_mut() {
            streak::recompute_on_append(streak_state, status_at_append, previous_date, now);
        }

        self.store.update_atomic(goal_id, &record, version).await?;

        info!(
            goal_id = %goal_id,
            owner_id = %owner_id,
            value,
            status = record.status.as_str(),
            "progress appended"
        );
        Ok(record)
    }

    /// Delete a goal owned by `owner_id`; goals have no dependents, so
    /// nothing cascades
    ///
    /// # Errors
    ///
    /// Returns not-found when the goal is absent or owned by someone
    /// else, or a storage error.
    pub async fn delete_goal(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<()> {
        let deleted = self.store.delete(owner_id, goal_id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Goal {goal_id}")).with_user_id(owner_id));
        }

        info!(goal_id = %goal_id, owner_id = %owner_id, "goal deleted");
        Ok(())
    }

    async fn load_owned(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<VersionedGoal> {
        self.store
            .find_one(owner_id, goal_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Goal {goal_id}")).with_user_id(owner_id))
    }
}
