// ABOUTME: Goal entity with progress ledger, milestones, streak, and derived values
// ABOUTME: Includes explicit request validation returning per-field errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Goal entity and request types
//!
//! A [`GoalRecord`] is the persisted document: identity, target
//! definition, the append-only progress ledger, and lifecycle status.
//! `current` is a cached projection of the most recent ledger entry; the
//! ledger is the source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FieldError;

/// Seconds per day, for day-granularity arithmetic on timestamps
const SECS_PER_DAY: i64 = 86_400;

/// What kind of target a goal measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Body weight targets
    Weight,
    /// Strength targets (lift numbers, rep maxes)
    Strength,
    /// Endurance targets (distance, duration)
    Endurance,
    /// Flexibility and mobility targets
    Flexibility,
    /// Nutrition targets (calories, macros)
    Nutrition,
    /// Habit formation targets, typically streak-requiring
    Habit,
    /// User-defined target
    #[default]
    Custom,
}

impl GoalType {
    /// Convert to the wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Strength => "strength",
            Self::Endurance => "endurance",
            Self::Flexibility => "flexibility",
            Self::Nutrition => "nutrition",
            Self::Habit => "habit",
            Self::Custom => "custom",
        }
    }

    /// Parse from the wire string; `None` when the value is not a member
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weight" => Some(Self::Weight),
            "strength" => Some(Self::Strength),
            "endurance" => Some(Self::Endurance),
            "flexibility" => Some(Self::Flexibility),
            "nutrition" => Some(Self::Nutrition),
            "habit" => Some(Self::Habit),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Lifecycle status of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Accepting progress; the only status with automatic transitions
    #[default]
    Active,
    /// Target reached; never automatically regresses
    Completed,
    /// Explicitly paused by the owner
    Paused,
    /// Explicitly cancelled by the owner
    Cancelled,
}

impl GoalStatus {
    /// Convert to the wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from the wire string; `None` when the value is not a member
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "paused" => Some(Self::Paused),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Informational priority, no scheduling semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    #[default]
    Medium,
    /// High priority
    High,
}

impl Priority {
    /// Convert to the wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse from the wire string; `None` when the value is not a member
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Grouping dimension for analytics breakdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// General fitness goals
    #[default]
    Fitness,
    /// Health goals (weight, biomarkers)
    Health,
    /// Lifestyle goals (habits, sleep)
    Lifestyle,
    /// Performance goals (race times, lift numbers)
    Performance,
}

impl Category {
    /// All categories, in breakdown display order
    pub const ALL: [Self; 4] = [
        Self::Fitness,
        Self::Health,
        Self::Lifestyle,
        Self::Performance,
    ];

    /// Convert to the wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::Health => "health",
            Self::Lifestyle => "lifestyle",
            Self::Performance => "performance",
        }
    }

    /// Parse from the wire string; `None` when the value is not a member
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fitness" => Some(Self::Fitness),
            "health" => Some(Self::Health),
            "lifestyle" => Some(Self::Lifestyle),
            "performance" => Some(Self::Performance),
            _ => None,
        }
    }
}

/// How often a reminder would fire (informational; no scheduler in core)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReminderFrequency {
    /// Daily reminder
    #[default]
    Daily,
    /// Weekly reminder
    Weekly,
    /// Monthly reminder
    Monthly,
}

/// Reminder preferences carried on a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Reminders {
    /// Whether reminders are on
    pub enabled: bool,
    /// Cadence when enabled
    pub frequency: ReminderFrequency,
}

/// A dated, valued, optionally-annotated observation in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// When the value was observed
    pub date: DateTime<Utc>,
    /// The observed value, in the goal's unit
    pub value: f64,
    /// Free-text annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// An intermediate sub-target, tracked independently of the goal target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Display title
    pub title: String,
    /// Milestone target value
    pub target: f64,
    /// Current value toward the milestone
    pub current: f64,
    /// Measurement unit
    pub unit: String,
    /// Whether the milestone has been reached
    pub completed: bool,
    /// When it was reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

/// Consecutive-day compliance state for streak-requiring goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Current run of consecutive qualifying days
    pub current: u32,
    /// Target run length
    pub target: u32,
}

/// The persisted goal document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRecord {
    /// Unique identifier, immutable
    pub id: Uuid,
    /// Owning user, never reassigned
    pub owner_id: Uuid,
    /// Display title
    pub title: String,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// What kind of target this goal measures
    pub goal_type: GoalType,
    /// Target value in `unit`
    pub target: f64,
    /// Cached projection of the most recent ledger value
    pub current: f64,
    /// Free-text measurement unit, consistent within this goal
    pub unit: String,
    /// When tracking began
    pub start_date: DateTime<Utc>,
    /// Deadline; `>= start_date` enforced at creation only
    pub target_date: DateTime<Utc>,
    /// Intermediate sub-targets
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Lifecycle status
    pub status: GoalStatus,
    /// Informational priority
    pub priority: Priority,
    /// Analytics grouping dimension
    pub category: Category,
    /// Append-only progress ledger, insertion order chronological-intent
    #[serde(default)]
    pub progress: Vec<ProgressEntry>,
    /// Reminder preferences
    #[serde(default)]
    pub reminders: Reminders,
    /// Streak state; present iff the goal is streak-requiring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<Streak>,
    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the goal is visible beyond its owner
    #[serde(default)]
    pub is_public: bool,
    /// Creation timestamp; orders listings and buckets time-series
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// Ceiling division of a signed duration into whole days
fn days_ceil(duration: chrono::Duration) -> i64 {
    let secs = duration.num_seconds();
    secs.div_euclid(SECS_PER_DAY) + i64::from(secs.rem_euclid(SECS_PER_DAY) > 0)
}

impl GoalRecord {
    /// Percentage of target reached, clamped to `0..=100`
    ///
    /// A zero target yields 0 (divide-by-zero guard). `current` itself is
    /// never capped; only this display value clamps.
    #[must_use]
    pub fn progress_percentage(&self) -> u32 {
        if self.target == 0.0 {
            return 0;
        }
        let pct = (self.current / self.target * 100.0).round();
        pct.clamp(0.0, 100.0) as u32
    }

    /// Whole days until the target date, clamped to `>= 0`
    #[must_use]
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        days_ceil(self.target_date - now).max(0)
    }

    /// Whole days since tracking began
    #[must_use]
    pub fn days_elapsed(&self, now: DateTime<Utc>) -> i64 {
        days_ceil(now - self.start_date)
    }

    /// Whether the goal is past its deadline and still active
    ///
    /// Uses the raw target-date comparison, not the clamped
    /// [`days_remaining`](Self::days_remaining) display value.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.target_date < now && self.status == GoalStatus::Active
    }

    /// Date of the most recent ledger entry, if any
    #[must_use]
    pub fn last_progress_date(&self) -> Option<DateTime<Utc>> {
        self.progress.last().map(|entry| entry.date)
    }
}

/// Request payload for creating a goal
///
/// Required fields are modeled as `Option` so that [`validate`]
/// (Self::validate) can report every missing or malformed field at once
/// instead of failing on the first deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGoalRequest {
    /// Display title (required)
    pub title: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Goal type as a wire string (required, enum-validated)
    #[serde(alias = "type")]
    pub goal_type: Option<String>,
    /// Target value (required, non-negative)
    pub target: Option<f64>,
    /// Seed value for `current`; defaults to 0
    pub current: Option<f64>,
    /// Measurement unit (required)
    pub unit: Option<String>,
    /// When tracking begins; defaults to now
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline (required, `>= start_date`)
    pub target_date: Option<DateTime<Utc>>,
    /// Initial milestones
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Priority as a wire string; defaults to medium
    pub priority: Option<String>,
    /// Category as a wire string; defaults to fitness
    pub category: Option<String>,
    /// Reminder preferences
    pub reminders: Option<Reminders>,
    /// Target consecutive-day count; presence makes the goal streak-requiring
    pub streak_target: Option<u32>,
    /// Free-form labels
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the goal is visible beyond its owner
    #[serde(default)]
    pub is_public: bool,
}

impl CreateGoalRequest {
    /// Validate the request, returning every field-level failure
    ///
    /// An empty vector means the request is well formed and
    /// [`into_record`](Self::into_record) may be called.
    #[must_use]
    pub fn validate(&self, now: DateTime<Utc>) -> Vec<FieldError> {
        let mut errors = Vec::new();

        match self.title.as_deref() {
            None => errors.push(FieldError::new("title", "title is required")),
            Some(t) if t.trim().is_empty() => {
                errors.push(FieldError::new("title", "title must not be empty"));
            }
            Some(_) => {}
        }

        match self.goal_type.as_deref() {
            None => errors.push(FieldError::new("goal_type", "goal_type is required")),
            Some(s) if GoalType::parse(s).is_none() => {
                errors.push(FieldError::new(
                    "goal_type",
                    format!("'{s}' is not a valid goal type"),
                ));
            }
            Some(_) => {}
        }

        match self.target {
            None => errors.push(FieldError::new("target", "target is required")),
            Some(t) if !t.is_finite() || t < 0.0 => {
                errors.push(FieldError::new("target", "target must be a non-negative number"));
            }
            Some(_) => {}
        }

        match self.unit.as_deref() {
            None => errors.push(FieldError::new("unit", "unit is required")),
            Some(u) if u.trim().is_empty() => {
                errors.push(FieldError::new("unit", "unit must not be empty"));
            }
            Some(_) => {}
        }

        match self.target_date {
            None => errors.push(FieldError::new("target_date", "target_date is required")),
            Some(target_date) => {
                let start = self.start_date.unwrap_or(now);
                if target_date < start {
                    errors.push(FieldError::new(
                        "target_date",
                        "target_date must not be before start_date",
                    ));
                }
            }
        }

        if let Some(p) = self.priority.as_deref() {
            if Priority::parse(p).is_none() {
                errors.push(FieldError::new(
                    "priority",
                    format!("'{p}' is not a valid priority"),
                ));
            }
        }

        if let Some(c) = self.category.as_deref() {
            if Category::parse(c).is_none() {
                errors.push(FieldError::new(
                    "category",
                    format!("'{c}' is not a valid category"),
                ));
            }
        }

        if let Some(0) = self.streak_target {
            errors.push(FieldError::new(
                "streak_target",
                "streak_target must be at least 1",
            ));
        }

        errors
    }

    /// Build the persisted record; call only after [`validate`](Self::validate)
    /// returned no errors
    #[must_use]
    pub fn into_record(self, owner_id: Uuid, now: DateTime<Utc>) -> GoalRecord {
        let start_date = self.start_date.unwrap_or(now);
        GoalRecord {
            id: Uuid::new_v4(),
            owner_id,
            title: self.title.unwrap_or_default(),
            description: self.description,
            goal_type: self
                .goal_type
                .as_deref()
                .and_then(GoalType::parse)
                .unwrap_or_default(),
            target: self.target.unwrap_or_default(),
            current: self.current.unwrap_or(0.0),
            unit: self.unit.unwrap_or_default(),
            start_date,
            target_date: self.target_date.unwrap_or(start_date),
            milestones: self.milestones,
            status: GoalStatus::Active,
            priority: self
                .priority
                .as_deref()
                .and_then(Priority::parse)
                .unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .and_then(Category::parse)
                .unwrap_or_default(),
            progress: Vec::new(),
            reminders: self.reminders.unwrap_or_default(),
            streak: self.streak_target.map(|target| Streak { current: 0, target }),
            tags: self.tags,
            is_public: self.is_public,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a goal; absent fields are left unchanged
///
/// The progress ledger and `current` are deliberately not updatable
/// through this path; they change only via progress appends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGoalRequest {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New status as a wire string (pause/cancel/reactivate are explicit)
    pub status: Option<String>,
    /// New target value
    pub target: Option<f64>,
    /// New unit
    pub unit: Option<String>,
    /// New deadline
    pub target_date: Option<DateTime<Utc>>,
    /// New priority as a wire string
    pub priority: Option<String>,
    /// New category as a wire string
    pub category: Option<String>,
    /// Replacement milestone list
    pub milestones: Option<Vec<Milestone>>,
    /// New reminder preferences
    pub reminders: Option<Reminders>,
    /// Replacement tag list
    pub tags: Option<Vec<String>>,
    /// New visibility
    pub is_public: Option<bool>,
}

impl UpdateGoalRequest {
    /// Validate changed enum fields, returning every failure
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if let Some(s) = self.status.as_deref() {
            if GoalStatus::parse(s).is_none() {
                errors.push(FieldError::new(
                    "status",
                    format!("'{s}' is not a valid status"),
                ));
            }
        }
        if let Some(p) = self.priority.as_deref() {
            if Priority::parse(p).is_none() {
                errors.push(FieldError::new(
                    "priority",
                    format!("'{p}' is not a valid priority"),
                ));
            }
        }
        if let Some(c) = self.category.as_deref() {
            if Category::parse(c).is_none() {
                errors.push(FieldError::new(
                    "category",
                    format!("'{c}' is not a valid category"),
                ));
            }
        }
        if let Some(t) = self.target {
            if !t.is_finite() || t < 0.0 {
                errors.push(FieldError::new("target", "target must be a non-negative number"));
            }
        }

        errors
    }

    /// Apply the update in place; call only after [`validate`](Self::validate)
    /// returned no errors
    pub fn apply(self, goal: &mut GoalRecord, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            goal.title = title;
        }
        if let Some(description) = self.description {
            goal.description = Some(description);
        }
        if let Some(status) = self.status.as_deref().and_then(GoalStatus::parse) {
            goal.status = status;
        }
        if let Some(target) = self.target {
            goal.target = target;
        }
        if let Some(unit) = self.unit {
            goal.unit = unit;
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
        if let Some(priority) = self.priority.as_deref().and_then(Priority::parse) {
            goal.priority = priority;
        }
        if let Some(category) = self.category.as_deref().and_then(Category::parse) {
            goal.category = category;
        }
        if let Some(milestones) = self.milestones {
            goal.milestones = milestones;
        }
        if let Some(reminders) = self.reminders {
            goal.reminders = reminders;
        }
        if let Some(tags) = self.tags {
            goal.tags = tags;
        }
        if let Some(is_public) = self.is_public {
            goal.is_public = is_public;
        }
        goal.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_record() -> GoalRecord {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap();
        CreateGoalRequest {
            title: Some("Lose 10 lbs".into()),
            goal_type: Some("weight".into()),
            target: Some(10.0),
            unit: Some("lbs".into()),
            target_date: Some(now + Duration::days(30)),
            ..CreateGoalRequest::default()
        }
        .into_record(Uuid::new_v4(), now)
    }

    #[test]
    fn test_progress_percentage_clamps_and_guards_zero() {
        let mut goal = sample_record();
        assert_eq!(goal.progress_percentage(), 0);

        goal.current = 4.0;
        assert_eq!(goal.progress_percentage(), 40);

        goal.current = 12.0;
        assert_eq!(goal.progress_percentage(), 100);

        goal.target = 0.0;
        assert_eq!(goal.progress_percentage(), 0);
    }

    #[test]
    fn test_days_remaining_clamped_overdue_uses_raw_dates() {
        let goal = sample_record();
        let now = goal.start_date;

        assert_eq!(goal.days_remaining(now), 30);
        assert!(!goal.is_overdue(now));

        let after_deadline = goal.target_date + Duration::hours(2);
        assert_eq!(goal.days_remaining(after_deadline), 0);
        assert!(goal.is_overdue(after_deadline));
    }

    #[test]
    fn test_days_elapsed_rounds_up() {
        let goal = sample_record();
        assert_eq!(goal.days_elapsed(goal.start_date + Duration::hours(1)), 1);
        assert_eq!(
            goal.days_elapsed(goal.start_date + Duration::days(3) + Duration::hours(1)),
            4
        );
    }

    #[test]
    fn test_create_validation_reports_all_fields() {
        let now = Utc::now();
        let errors = CreateGoalRequest::default().validate(now);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"goal_type"));
        assert!(fields.contains(&"target"));
        assert!(fields.contains(&"unit"));
        assert!(fields.contains(&"target_date"));
    }

    #[test]
    fn test_create_validation_rejects_bad_enum_and_date_order() {
        let now = Utc::now();
        let request = CreateGoalRequest {
            title: Some("Run".into()),
            goal_type: Some("sprinting".into()),
            target: Some(5.0),
            unit: Some("km".into()),
            start_date: Some(now),
            target_date: Some(now - Duration::days(1)),
            ..CreateGoalRequest::default()
        };

        let errors = request.validate(now);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["goal_type", "target_date"]);
    }

    #[test]
    fn test_streak_target_makes_goal_streak_requiring() {
        let now = Utc::now();
        let record = CreateGoalRequest {
            title: Some("Stretch daily".into()),
            goal_type: Some("habit".into()),
            target: Some(30.0),
            unit: Some("sessions".into()),
            target_date: Some(now + Duration::days(30)),
            streak_target: Some(7),
            ..CreateGoalRequest::default()
        }
        .into_record(Uuid::new_v4(), now);

        assert_eq!(record.streak, Some(Streak { current: 0, target: 7 }));
    }

    #[test]
    fn test_update_validation_and_apply() {
        let mut goal = sample_record();
        let now = goal.created_at + Duration::days(1);

        let bad = UpdateGoalRequest {
            status: Some("archived".into()),
            ..UpdateGoalRequest::default()
        };
        assert_eq!(bad.validate()[0].field, "status");

        let update = UpdateGoalRequest {
            status: Some("paused".into()),
            priority: Some("high".into()),
            ..UpdateGoalRequest::default()
        };
        assert!(update.validate().is_empty());
        update.apply(&mut goal, now);

        assert_eq!(goal.status, GoalStatus::Paused);
        assert_eq!(goal.priority, Priority::High);
        assert_eq!(goal.updated_at, now);
    }
}
