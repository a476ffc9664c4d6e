// ABOUTME: Integration tests for analytics aggregation over the in-memory store
// ABOUTME: Covers windowing, rollup math, deadlines, and empty input

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use common::{create_test_service, init_test_logging, weight_goal_request};
use strive_server::analytics::{AnalyticsAggregator, Granularity};
use strive_server::models::Category;
use strive_server::storage::{GoalStore, InMemoryGoalStore, ScanWindow};
use uuid::Uuid;

#[tokio::test]
async fn test_report_over_empty_store() {
    init_test_logging();
    let store = Arc::new(InMemoryGoalStore::new());
    let aggregator = AnalyticsAggregator::new(store);

    let report = aggregator
        .report(ScanWindow::default(), Granularity::Day, None)
        .await
        .unwrap();

    assert_eq!(report.total_goals, 0);
    assert_eq!(report.completion_rate, 0.0);
    assert_eq!(report.average_progress, 0.0);
    assert!(report.time_series.is_empty());
    assert_eq!(report.categories.len(), 4);
}

#[tokio::test]
async fn test_report_aggregates_across_users() {
    let (store, service) = create_test_service();
    let aggregator = AnalyticsAggregator::new(Arc::clone(&store));

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let done = service
        .create_goal(alice, weight_goal_request("alice done", 10.0, "kg"))
        .await
        .unwrap();
    service
        .append_progress(alice, done.id, 10.0, None)
        .await
        .unwrap();

    let halfway = service
        .create_goal(alice, weight_goal_request("alice halfway", 10.0, "kg"))
        .await
        .unwrap();
    service
        .append_progress(alice, halfway.id, 5.0, None)
        .await
        .unwrap();

    service
        .create_goal(bob, weight_goal_request("bob fresh", 10.0, "kg"))
        .await
        .unwrap();

    let report = aggregator
        .report(ScanWindow::default(), Granularity::Day, None)
        .await
        .unwrap();

    assert_eq!(report.total_goals, 3);
    assert_eq!(report.completed_goals, 1);
    assert_eq!(report.active_goals, 2);
    assert!((report.completion_rate - 100.0 / 3.0).abs() < 1e-9);
    // Active subset: 50% and 0%
    assert!((report.average_progress - 25.0).abs() < 1e-9);

    let counted: u64 = report.categories.iter().map(|c| c.count).sum();
    assert_eq!(counted, report.total_goals);
    let fitness = report
        .categories
        .iter()
        .find(|c| c.category == Category::Fitness)
        .unwrap();
    assert_eq!(fitness.count, 3);

    // All three were created just now, in a single day bucket
    assert_eq!(report.time_series.len(), 1);
    assert_eq!(report.time_series[0].count, 3);
}

#[tokio::test]
async fn test_window_restricts_scope() {
    let (store, service) = create_test_service();
    let aggregator = AnalyticsAggregator::new(Arc::clone(&store));
    let owner = Uuid::new_v4();

    service
        .create_goal(owner, weight_goal_request("recent", 10.0, "kg"))
        .await
        .unwrap();

    let mut old = weight_goal_request("old", 10.0, "kg")
        .into_record(owner, Utc::now() - ChronoDuration::days(90));
    old.created_at = Utc::now() - ChronoDuration::days(90);
    store.insert(&old).await.unwrap();

    let window = ScanWindow {
        start: Some(Utc::now() - ChronoDuration::days(7)),
        end: None,
    };
    let report = aggregator
        .report(window, Granularity::Day, None)
        .await
        .unwrap();

    assert_eq!(report.total_goals, 1);
}

#[tokio::test]
async fn test_generous_deadline_still_completes() {
    let (store, service) = create_test_service();
    let aggregator = AnalyticsAggregator::new(Arc::clone(&store));
    let owner = Uuid::new_v4();

    service
        .create_goal(owner, weight_goal_request("g", 10.0, "kg"))
        .await
        .unwrap();

    let report = aggregator
        .report(
            ScanWindow::default(),
            Granularity::Week,
            Some(Duration::from_secs(5)),
        )
        .await
        .unwrap();

    assert_eq!(report.total_goals, 1);
    assert_eq!(report.time_series.len(), 1);
    assert!(report.time_series[0].bucket.contains("-W"));
}
