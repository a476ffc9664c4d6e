// ABOUTME: Route module organization for the Strive HTTP endpoints
// ABOUTME: Centralized router assembly plus shared identity extraction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Route modules
//!
//! Handlers are thin: they extract identity and parameters, delegate to
//! the service layer, and format the response envelope. Authentication
//! itself happens upstream; handlers only read the identity headers the
//! auth collaborator sets.

use std::sync::Arc;
use std::time::Duration;

use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use http::{HeaderMap, StatusCode};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::constants::{headers, limits};
use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use crate::storage::GoalStore;

/// Admin-facing analytics routes
pub mod analytics;
/// Goal CRUD and progress routes
pub mod goals;
/// Liveness route
pub mod health;

/// Assemble the full application router
pub fn router<S: GoalStore>(resources: Arc<ServerResources<S>>) -> Router {
    Router::new()
        .merge(goals::GoalRoutes::routes(Arc::clone(&resources)))
        .merge(analytics::AnalyticsRoutes::routes(resources))
        .merge(health::HealthRoutes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            limits::REQUEST_TIMEOUT_SECS,
        )))
}

/// Extract the authenticated user id placed by the upstream auth layer
///
/// # Errors
///
/// Returns an authentication error when the header is absent or not a
/// valid UUID.
pub(crate) fn authenticate(header_map: &HeaderMap) -> AppResult<Uuid> {
    let raw = header_map
        .get(headers::USER_ID)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    Uuid::parse_str(raw).map_err(|_| AppError::auth_required())
}

/// Require the administrative role header
///
/// # Errors
///
/// Returns a permission error when the role header is absent or not
/// `admin`.
pub(crate) fn require_admin(header_map: &HeaderMap) -> AppResult<()> {
    let role = header_map
        .get(headers::USER_ROLE)
        .and_then(|v| v.to_str().ok());

    if role == Some("admin") {
        Ok(())
    } else {
        Err(AppError::permission_denied(
            "Administrative role required for this endpoint",
        ))
    }
}

/// Wrap a payload in the success envelope
pub(crate) fn success(status: StatusCode, data: impl Serialize) -> Response {
    #[derive(Serialize)]
    struct Envelope<T> {
        status: &'static str,
        data: T,
    }

    (
        status,
        Json(Envelope {
            status: "success",
            data,
        }),
    )
        .into_response()
}
