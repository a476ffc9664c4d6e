// ABOUTME: Route handlers for the goal REST API
// ABOUTME: CRUD plus progress appends, all scoped to the authenticated owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Goal routes
//!
//! All endpoints require the identity header; every lookup is scoped to
//! the caller, so goals owned by other users are indistinguishable from
//! absent ones.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::ServerResources;
use crate::errors::{AppError, AppResult, FieldError};
use crate::models::{CreateGoalRequest, GoalRecord, GoalStatus, GoalType, UpdateGoalRequest};
use crate::pagination::PaginationParams;
use crate::storage::{GoalFilter, GoalStore};

use super::{authenticate, success};

/// A goal as returned to clients: the record plus its derived values,
/// computed at serialization time
#[derive(Debug, Serialize)]
pub struct GoalResponse {
    /// The persisted record
    #[serde(flatten)]
    pub goal: GoalRecord,
    /// Percentage of target reached, clamped to `0..=100`
    pub progress_percentage: u32,
    /// Whole days until the deadline, clamped to `>= 0`
    pub days_remaining: i64,
    /// Whole days since tracking began
    pub days_elapsed: i64,
    /// Past deadline and still active
    pub is_overdue: bool,
}

impl GoalResponse {
    /// Build the response view for a record as of `now`
    #[must_use]
    pub fn from_record(goal: GoalRecord, now: DateTime<Utc>) -> Self {
        let progress_percentage = goal.progress_percentage();
        let days_remaining = goal.days_remaining(now);
        let days_elapsed = goal.days_elapsed(now);
        let is_overdue = goal.is_overdue(now);
        Self {
            goal,
            progress_percentage,
            days_remaining,
            days_elapsed,
            is_overdue,
        }
    }
}

/// Response for listing goals
#[derive(Debug, Serialize)]
pub struct ListGoalsResponse {
    /// Goals in this page
    pub goals: Vec<GoalResponse>,
    /// Total goals matching the filter
    pub total: u64,
    /// Requested page
    pub page: u32,
    /// Requested page size
    pub limit: u32,
}

/// Query parameters for listing goals
#[derive(Debug, Deserialize, Default)]
pub struct ListGoalsQuery {
    /// Filter by lifecycle status
    pub status: Option<String>,
    /// Filter by goal type
    #[serde(rename = "type")]
    pub goal_type: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
    /// Items per page
    pub limit: Option<u32>,
}

impl ListGoalsQuery {
    /// Parse the filter strings, rejecting non-member values
    fn filter(&self) -> AppResult<GoalFilter> {
        let mut errors = Vec::new();

        let status = match self.status.as_deref() {
            Some(s) => match GoalStatus::parse(s) {
                Some(parsed) => Some(parsed),
                None => {
                    errors.push(FieldError::new(
                        "status",
                        format!("'{s}' is not a valid status"),
                    ));
                    None
                }
            },
            None => None,
        };

        let goal_type = match self.goal_type.as_deref() {
            Some(s) => match GoalType::parse(s) {
                Some(parsed) => Some(parsed),
                None => {
                    errors.push(FieldError::new(
                        "type",
                        format!("'{s}' is not a valid goal type"),
                    ));
                    None
                }
            },
            None => None,
        };

        if errors.is_empty() {
            Ok(GoalFilter { status, goal_type })
        } else {
            Err(AppError::validation(errors))
        }
    }
}

/// Request body for appending progress
#[derive(Debug, Deserialize)]
pub struct AppendProgressBody {
    /// Observed value (required)
    pub value: Option<f64>,
    /// Free-text annotation
    pub notes: Option<String>,
}

/// Goal routes handler
pub struct GoalRoutes;

impl GoalRoutes {
    /// Create all goal routes
    pub fn routes<S: GoalStore>(resources: Arc<ServerResources<S>>) -> Router {
        Router::new()
            .route("/api/goals", get(Self::handle_list::<S>))
            .route("/api/goals", post(Self::handle_create::<S>))
            .route("/api/goals/:id", get(Self::handle_get::<S>))
            .route("/api/goals/:id", put(Self::handle_update::<S>))
            .route("/api/goals/:id", delete(Self::handle_delete::<S>))
            .route(
                "/api/goals/:id/progress",
                post(Self::handle_append_progress::<S>),
            )
            .with_state(resources)
    }

    /// Parse a path id; a malformed id cannot name an existing goal
    fn parse_goal_id(id: &str) -> AppResult<Uuid> {
        Uuid::parse_str(id).map_err(|_| AppError::not_found(format!("Goal {id}")))
    }

    /// Handle GET /api/goals - list the caller's goals
    async fn handle_list<S: GoalStore>(
        State(resources): State<Arc<ServerResources<S>>>,
        headers: HeaderMap,
        Query(query): Query<ListGoalsQuery>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let filter = query.filter()?;
        let pagination = PaginationParams::from_query(query.page, query.limit);

        let page = resources
            .goals
            .list_goals(owner_id, filter, pagination)
            .await?;

        let now = Utc::now();
        let response = ListGoalsResponse {
            goals: page
                .items
                .into_iter()
                .map(|goal| GoalResponse::from_record(goal, now))
                .collect(),
            total: page.total,
            page: pagination.page,
            limit: pagination.limit,
        };

        Ok(success(StatusCode::OK, response))
    }

    /// Handle POST /api/goals - create a goal
    async fn handle_create<S: GoalStore>(
        State(resources): State<Arc<ServerResources<S>>>,
        headers: HeaderMap,
        Json(body): Json<CreateGoalRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let record = resources.goals.create_goal(owner_id, body).await?;

        Ok(success(
            StatusCode::CREATED,
            GoalResponse::from_record(record, Utc::now()),
        ))
    }

    /// Handle GET /api/goals/:id - fetch one goal
    async fn handle_get<S: GoalStore>(
        State(resources): State<Arc<ServerResources<S>>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let goal_id = Self::parse_goal_id(&id)?;

        let record = resources.goals.get_goal(owner_id, goal_id).await?;
        Ok(success(
            StatusCode::OK,
            GoalResponse::from_record(record, Utc::now()),
        ))
    }

    /// Handle PUT /api/goals/:id - partial update
    async fn handle_update<S: GoalStore>(
        State(resources): State<Arc<ServerResources<S>>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateGoalRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let goal_id = Self::parse_goal_id(&id)?;

        let record = resources.goals.update_goal(owner_id, goal_id, body).await?;
        Ok(success(
            StatusCode::OK,
            GoalResponse::from_record(record, Utc::now()),
        ))
    }

    /// Handle DELETE /api/goals/:id - delete a goal
    async fn handle_delete<S: GoalStore>(
        State(resources): State<Arc<ServerResources<S>>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let goal_id = Self::parse_goal_id(&id)?;

        resources.goals.delete_goal(owner_id, goal_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/goals/:id/progress - append a ledger entry
    async fn handle_append_progress<S: GoalStore>(
        State(resources): State<Arc<ServerResources<S>>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<AppendProgressBody>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let goal_id = Self::parse_goal_id(&id)?;

        let value = body.value.ok_or_else(|| {
            AppError::validation(vec![FieldError::new("value", "value is required")])
        })?;

        let record = resources
            .goals
            .append_progress(owner_id, goal_id, value, body.notes)
            .await?;

        Ok(success(
            StatusCode::OK,
            GoalResponse::from_record(record, Utc::now()),
        ))
    }
}
