// ABOUTME: Read-only cross-user analytics over goal records
// ABOUTME: Completion rate, category breakdown, time-series counts, average progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Analytics aggregation
//!
//! Rollups are pure functions over a slice of goal records; the
//! [`AnalyticsAggregator`] front-end scans storage for the query window
//! and assembles a report. Scans never mutate anything, so a deadline
//! abort simply discards partial results. Completion rate is computed
//! among goals created within the query window (the window the scan
//! already restricts to).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::{Category, GoalRecord, GoalStatus};
use crate::storage::{GoalStore, ScanWindow};

/// Bucket width for time-series aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One bucket per calendar day
    #[default]
    Day,
    /// One bucket per ISO week
    Week,
    /// One bucket per calendar month
    Month,
}

impl Granularity {
    /// Parse from the wire string; `None` when the value is not a member
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    /// Truncate a timestamp to this granularity's bucket label
    #[must_use]
    pub fn bucket(&self, timestamp: DateTime<Utc>) -> String {
        match self {
            Self::Day => timestamp.format("%Y-%m-%d").to_string(),
            Self::Week => {
                let week = timestamp.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Self::Month => timestamp.format("%Y-%m").to_string(),
        }
    }
}

/// Per-category rollup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    /// The category being summarized
    pub category: Category,
    /// Goals in this category within the scope
    pub count: u64,
    /// Percentage of them that are completed
    pub completion_rate: f64,
}

/// One time-series bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeBucket {
    /// Bucket label (`2025-06-01`, `2025-W23`, `2025-06`)
    pub bucket: String,
    /// Goals created in this bucket
    pub count: u64,
}

/// Full analytics report for a query window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Goals in scope
    pub total_goals: u64,
    /// Active subset size
    pub active_goals: u64,
    /// Completed subset size
    pub completed_goals: u64,
    /// Percentage of goals in scope that are completed
    pub completion_rate: f64,
    /// Mean progress percentage across the active subset
    pub average_progress: f64,
    /// Per-category rollups
    pub categories: Vec<CategoryStats>,
    /// Goals created per bucket, ascending
    pub time_series: Vec<TimeBucket>,
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
}

/// Percentage of goals with completed status; 0 for empty input
#[must_use]
pub fn completion_rate(goals: &[GoalRecord]) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }
    let completed = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Completed)
        .count();
    completed as f64 / goals.len() as f64 * 100.0
}

/// Group goals by category with per-category completion rates
///
/// Every category appears in the output, zero-count ones included, so
/// the counts always partition the scope.
#[must_use]
pub fn category_breakdown(goals: &[GoalRecord]) -> Vec<CategoryStats> {
    let mut counts: HashMap<Category, (u64, u64)> = HashMap::new();
    for goal in goals {
        let entry = counts.entry(goal.category).or_default();
        entry.0 += 1;
        if goal.status == GoalStatus::Completed {
            entry.1 += 1;
        }
    }

    Category::ALL
        .iter()
        .map(|&category| {
            let (count, completed) = counts.get(&category).copied().unwrap_or((0, 0));
            CategoryStats {
                category,
                count,
                completion_rate: if count == 0 {
                    0.0
                } else {
                    completed as f64 / count as f64 * 100.0
                },
            }
        })
        .collect()
}

/// Goals created per time bucket, ascending by bucket
#[must_use]
pub fn time_series(goals: &[GoalRecord], granularity: Granularity) -> Vec<TimeBucket> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for goal in goals {
        *buckets.entry(granularity.bucket(goal.created_at)).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket, count)| TimeBucket { bucket, count })
        .collect()
}

/// Mean progress percentage across the active subset; 0 for empty input
#[must_use]
pub fn average_progress(goals: &[GoalRecord]) -> f64 {
    let active: Vec<u32> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .map(GoalRecord::progress_percentage)
        .collect();

    if active.is_empty() {
        return 0.0;
    }
    f64::from(active.iter().sum::<u32>()) / active.len() as f64
}

/// Assemble a full report from records already in memory
#[must_use]
pub fn assemble(goals: &[GoalRecord], granularity: Granularity) -> AnalyticsReport {
    AnalyticsReport {
        total_goals: goals.len() as u64,
        active_goals: goals
            .iter()
            .filter(|g| g.status == GoalStatus::Active)
            .count() as u64,
        completed_goals: goals
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .count() as u64,
        completion_rate: completion_rate(goals),
        average_progress: average_progress(goals),
        categories: category_breakdown(goals),
        time_series: time_series(goals, granularity),
        generated_at: Utc::now(),
    }
}

/// Scanning front-end over a [`GoalStore`]
#[derive(Debug, Clone)]
pub struct AnalyticsAggregator<S> {
    store: Arc<S>,
}

impl<S: GoalStore> AnalyticsAggregator<S> {
    /// Create an aggregator over the given backend
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Scan the window and assemble a report
    ///
    /// The optional deadline bounds the scan; on expiry the scan is
    /// aborted and a timeout error surfaces. Nothing is mutated either
    /// way.
    ///
    /// # Errors
    ///
    /// Returns a timeout error when the deadline expires, or a storage
    /// error if the scan fails.
    pub async fn report(
        &self,
        window: ScanWindow,
        granularity: Granularity,
        deadline: Option<Duration>,
    ) -> AppResult<AnalyticsReport> {
        let goals = match deadline {
            Some(limit) => tokio::time::timeout(limit, self.store.scan(&window))
                .await
                .map_err(|_| AppError::timeout("analytics scan exceeded deadline"))??,
            None => self.store.scan(&window).await?,
        };

        debug!(scanned = goals.len(), "analytics scan complete");
        Ok(assemble(&goals, granularity))
    }
}
