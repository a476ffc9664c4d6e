// ABOUTME: Liveness route for load balancers and orchestration probes
// ABOUTME: Stateless; reports service identity and version
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Health check route

use axum::response::Response;
use axum::routing::get;
use axum::Router;
use http::StatusCode;
use serde::Serialize;

use crate::constants::service_names;

use super::success;

/// Liveness payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service name
    pub service: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Health routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    pub fn routes() -> Router {
        Router::new().route("/api/health", get(Self::handle_health))
    }

    /// Handle GET /api/health
    async fn handle_health() -> Response {
        success(
            StatusCode::OK,
            HealthResponse {
                service: service_names::STRIVE_SERVER,
                version: env!("CARGO_PKG_VERSION"),
            },
        )
    }
}
