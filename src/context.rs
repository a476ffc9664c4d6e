// ABOUTME: Dependency injection context shared by route handlers
// ABOUTME: Bundles the goal service, analytics aggregator, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Server resources
//!
//! One [`ServerResources`] is built at startup and shared behind an
//! `Arc` as axum state. It is generic over the storage backend so test
//! routers can run against the in-memory store.

use std::sync::Arc;

use crate::analytics::AnalyticsAggregator;
use crate::config::ServerConfig;
use crate::goals::GoalService;
use crate::storage::GoalStore;

/// Shared dependencies for the route layer
#[derive(Debug)]
pub struct ServerResources<S> {
    /// Goal use-case layer
    pub goals: GoalService<S>,
    /// Analytics front-end
    pub analytics: AnalyticsAggregator<S>,
    /// Runtime configuration
    pub config: ServerConfig,
}

impl<S: GoalStore> ServerResources<S> {
    /// Assemble resources over a storage backend
    pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
        Self {
            goals: GoalService::new(Arc::clone(&store)),
            analytics: AnalyticsAggregator::new(store),
            config,
        }
    }
}
