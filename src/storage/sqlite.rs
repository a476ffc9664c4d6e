// ABOUTME: SQLite storage backend persisting goals as JSON documents
// ABOUTME: Denormalized filter columns plus a version counter for atomic updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! SQLite storage backend
//!
//! Each goal is stored as one JSON document in the `goals` table, with
//! the fields the queries filter and order on (owner, status, type,
//! category, creation time) denormalized into columns. The `version`
//! column backs the optimistic concurrency check: an update only applies
//! while the caller's expected version still matches.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::GoalRecord;
use crate::pagination::{Page, PaginationParams};

use super::{GoalFilter, GoalStore, ScanWindow, VersionedGoal};

/// Timestamps are stored as RFC 3339 UTC text; a fixed fraction width
/// keeps lexicographic and chronological order identical.
fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite implementation of [`GoalStore`]
#[derive(Debug, Clone)]
pub struct SqliteGoalStore {
    pool: SqlitePool,
}

impl SqliteGoalStore {
    /// Open (and create if missing) the database behind `database_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the connection fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        Ok(Self { pool })
    }

    /// Create the schema if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                status TEXT NOT NULL,
                goal_type TEXT NOT NULL,
                category TEXT NOT NULL,
                goal_data TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create goals table: {e}")))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_goals_owner_created
            ON goals (owner_id, created_at DESC)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create goals index: {e}")))?;

        Ok(())
    }

    fn decode(goal_json: &str) -> AppResult<GoalRecord> {
        serde_json::from_str(goal_json)
            .map_err(|e| AppError::database(format!("Corrupt goal document: {e}")))
    }
}

#[async_trait]
impl GoalStore for SqliteGoalStore {
    async fn insert(&self, record: &GoalRecord) -> AppResult<()> {
        let goal_json = serde_json::to_string(record)?;

        sqlx::query(
            r"
            INSERT INTO goals (id, owner_id, status, goal_type, category, goal_data, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 1, $7, $8)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.owner_id.to_string())
        .bind(record.status.as_str())
        .bind(record.goal_type.as_str())
        .bind(record.category.as_str())
        .bind(goal_json)
        .bind(timestamp(record.created_at))
        .bind(timestamp(record.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert goal: {e}")))?;

        Ok(())
    }

    async fn find_one(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<Option<VersionedGoal>> {
        let row = sqlx::query(
            r"
            SELECT goal_data, version FROM goals
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(goal_id.to_string())
        .bind(owner_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load goal: {e}")))?;

        row.map(|row| {
            let goal_json: String = row.get("goal_data");
            Ok(VersionedGoal {
                record: Self::decode(&goal_json)?,
                version: row.get("version"),
            })
        })
        .transpose()
    }

    async fn find_many(
        &self,
        owner_id: Uuid,
        filter: &GoalFilter,
        pagination: PaginationParams,
    ) -> AppResult<Page<GoalRecord>> {
        let status = filter.status.map(|s| s.as_str());
        let goal_type = filter.goal_type.map(|t| t.as_str());

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM goals
            WHERE owner_id = $1
              AND ($2 IS NULL OR status = $2)
              AND ($3 IS NULL OR goal_type = $3)
            ",
        )
        .bind(owner_id.to_string())
        .bind(status)
        .bind(goal_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count goals: {e}")))?;

        let rows = sqlx::query(
            r"
            SELECT goal_data FROM goals
            WHERE owner_id = $1
              AND ($2 IS NULL OR status = $2)
              AND ($3 IS NULL OR goal_type = $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(owner_id.to_string())
        .bind(status)
        .bind(goal_type)
        .bind(i64::from(pagination.limit))
        .bind(i64::try_from(pagination.skip()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list goals: {e}")))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let goal_json: String = row.get("goal_data");
            items.push(Self::decode(&goal_json)?);
        }

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn update_atomic(
        &self,
        goal_id: Uuid,
        record: &GoalRecord,
        expected_version: i64,
    ) -> AppResult<()> {
        let goal_json = serde_json::to_string(record)?;

        let result = sqlx::query(
            r"
            UPDATE goals
            SET goal_data = $1, status = $2, goal_type = $3, category = $4,
                updated_at = $5, version = version + 1
            WHERE id = $6 AND version = $7
            ",
        )
        .bind(goal_json)
        .bind(record.status.as_str())
        .bind(record.goal_type.as_str())
        .bind(record.category.as_str())
        .bind(timestamp(record.updated_at))
        .bind(goal_id.to_string())
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update goal: {e}")))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Nothing matched: either the version moved or the row is gone
        let exists: i64 = sqlx::query_scalar(r"SELECT COUNT(*) FROM goals WHERE id = $1")
            .bind(goal_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to probe goal: {e}")))?;

        if exists > 0 {
            Err(AppError::conflict(format!("Goal {goal_id}")))
        } else {
            Err(AppError::not_found(format!("Goal {goal_id}")))
        }
    }

    async fn delete(&self, owner_id: Uuid, goal_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM goals WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(goal_id.to_string())
        .bind(owner_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete goal: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn scan(&self, window: &ScanWindow) -> AppResult<Vec<GoalRecord>> {
        let start = window.start.map(timestamp);
        let end = window.end.map(timestamp);

        let mut rows = sqlx::query(
            r"
            SELECT goal_data FROM goals
            WHERE ($1 IS NULL OR created_at >= $1)
              AND ($2 IS NULL OR created_at <= $2)
            ",
        )
        .bind(start)
        .bind(end)
        .fetch(&self.pool);

        let mut goals = Vec::new();
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| AppError::database(format!("Failed to scan goals: {e}")))?
        {
            let goal_json: String = row.get("goal_data");
            goals.push(Self::decode(&goal_json)?);
        }

        Ok(goals)
    }
}
