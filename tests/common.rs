// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides service, router, and request-building helpers
#![allow(dead_code)]

//! Shared test utilities for `strive_server`
//!
//! Common setup to reduce duplication across integration tests.

use std::sync::{Arc, Once};

use chrono::{Duration, Utc};
use strive_server::config::ServerConfig;
use strive_server::context::ServerResources;
use strive_server::goals::GoalService;
use strive_server::models::CreateGoalRequest;
use strive_server::storage::InMemoryGoalStore;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// In-memory store plus a service over it
pub fn create_test_service() -> (Arc<InMemoryGoalStore>, GoalService<InMemoryGoalStore>) {
    init_test_logging();
    let store = Arc::new(InMemoryGoalStore::new());
    let service = GoalService::new(Arc::clone(&store));
    (store, service)
}

/// Full server resources over an in-memory store, for router tests
pub fn create_test_resources() -> Arc<ServerResources<InMemoryGoalStore>> {
    init_test_logging();
    let store = Arc::new(InMemoryGoalStore::new());
    let config = ServerConfig::from_env().expect("default config loads");
    Arc::new(ServerResources::new(store, config))
}

/// A well-formed create request: `target` in `unit`, due in 30 days
pub fn weight_goal_request(title: &str, target: f64, unit: &str) -> CreateGoalRequest {
    CreateGoalRequest {
        title: Some(title.to_owned()),
        goal_type: Some("weight".to_owned()),
        target: Some(target),
        unit: Some(unit.to_owned()),
        target_date: Some(Utc::now() + Duration::days(30)),
        ..CreateGoalRequest::default()
    }
}

/// A streak-requiring habit goal request
pub fn habit_goal_request(title: &str, streak_target: u32) -> CreateGoalRequest {
    CreateGoalRequest {
        title: Some(title.to_owned()),
        goal_type: Some("habit".to_owned()),
        target: Some(30.0),
        unit: Some("sessions".to_owned()),
        target_date: Some(Utc::now() + Duration::days(60)),
        streak_target: Some(streak_target),
        ..CreateGoalRequest::default()
    }
}
