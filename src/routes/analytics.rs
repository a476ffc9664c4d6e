// ABOUTME: Route handlers for the admin-facing analytics reporting surface
// ABOUTME: Read-only cross-user rollups; requires the administrative role
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Analytics routes
//!
//! The report endpoint scans goal records across all users, so it sits
//! behind the administrative role header in addition to the identity
//! header.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};
use serde::Deserialize;

use crate::analytics::Granularity;
use crate::context::ServerResources;
use crate::errors::{AppError, FieldError};
use crate::storage::{GoalStore, ScanWindow};

use super::{authenticate, require_admin, success};

/// Query parameters for the analytics report
#[derive(Debug, Deserialize, Default)]
pub struct AnalyticsQuery {
    /// Inclusive lower bound on goal creation time (RFC 3339)
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on goal creation time (RFC 3339)
    pub end: Option<DateTime<Utc>>,
    /// Bucket width for the time series: day (default), week, month
    pub granularity: Option<String>,
    /// Scan deadline in milliseconds; aborts the scan on expiry
    pub deadline_ms: Option<u64>,
}

/// Analytics routes handler
pub struct AnalyticsRoutes;

impl AnalyticsRoutes {
    /// Create all analytics routes
    pub fn routes<S: GoalStore>(resources: Arc<ServerResources<S>>) -> Router {
        Router::new()
            .route("/api/admin/analytics", get(Self::handle_report::<S>))
            .with_state(resources)
    }

    /// Handle GET /api/admin/analytics - cross-user rollup report
    async fn handle_report<S: GoalStore>(
        State(resources): State<Arc<ServerResources<S>>>,
        headers: HeaderMap,
        Query(query): Query<AnalyticsQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers)?;
        require_admin(&headers)?;

        let granularity = match query.granularity.as_deref() {
            None => Granularity::default(),
            Some(raw) => Granularity::parse(raw).ok_or_else(|| {
                AppError::validation(vec![FieldError::new(
                    "granularity",
                    format!("'{raw}' is not a valid granularity"),
                )])
            })?,
        };

        let window = ScanWindow {
            start: query.start,
            end: query.end,
        };
        let deadline = query.deadline_ms.map(Duration::from_millis);

        let report = resources
            .analytics
            .report(window, granularity, deadline)
            .await?;

        Ok(success(StatusCode::OK, report))
    }
}
