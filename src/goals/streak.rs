// ABOUTME: Consecutive-day streak recomputation for streak-requiring goals
// ABOUTME: Runs as an explicit step of every progress append
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Streak tracking
//!
//! Day comparisons are on the UTC calendar date of ledger timestamps.
//! The goal's status is evaluated as of append time, so the append that
//! completes a goal still counts its day.

use chrono::{DateTime, Utc};

use crate::models::{GoalStatus, Streak};

/// Recompute the streak for a newly appended entry
///
/// Rules:
/// - entry exactly one day after the last ledger entry: `current + 1`
/// - entry on the same day as the last ledger entry: unchanged (a day
///   counts once)
/// - gap of more than one day, out-of-order date, or first entry: 1
/// - goal not active at append time: 0
pub fn recompute_on_append(
    streak: &mut Streak,
    status_at_append: GoalStatus,
    previous_date: Option<DateTime<Utc>>,
    entry_date: DateTime<Utc>,
) {
    if status_at_append != GoalStatus::Active {
        streak.current = 0;
        return;
    }

    let entry_day = entry_date.date_naive();
    match previous_date.map(|d| d.date_naive()) {
        Some(previous_day) => match (entry_day - previous_day).num_days() {
            0 => {}
            1 => streak.current += 1,
            _ => streak.current = 1,
        },
        None => streak.current = 1,
    }
}

/// Whether the streak has reached its target run length
#[must_use]
pub const fn target_reached(streak: &Streak) -> bool {
    streak.current >= streak.target
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).single().unwrap() + Duration::days(n)
    }

    fn streak(current: u32) -> Streak {
        Streak { current, target: 7 }
    }

    #[test]
    fn test_first_entry_starts_at_one() {
        let mut s = streak(0);
        recompute_on_append(&mut s, GoalStatus::Active, None, day(0));
        assert_eq!(s.current, 1);
    }

    #[test]
    fn test_consecutive_days_increment() {
        let mut s = streak(0);
        recompute_on_append(&mut s, GoalStatus::Active, None, day(0));
        recompute_on_append(&mut s, GoalStatus::Active, Some(day(0)), day(1));
        recompute_on_append(&mut s, GoalStatus::Active, Some(day(1)), day(2));
        assert_eq!(s.current, 3);
    }

    #[test]
    fn test_same_day_counts_once() {
        let mut s = streak(3);
        recompute_on_append(
            &mut s,
            GoalStatus::Active,
            Some(day(2)),
            day(2) + Duration::hours(5),
        );
        assert_eq!(s.current, 3);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let mut s = streak(5);
        recompute_on_append(&mut s, GoalStatus::Active, Some(day(0)), day(3));
        assert_eq!(s.current, 1);
    }

    #[test]
    fn test_out_of_order_date_resets_to_one() {
        let mut s = streak(5);
        recompute_on_append(&mut s, GoalStatus::Active, Some(day(3)), day(1));
        assert_eq!(s.current, 1);
    }

    #[test]
    fn test_inactive_goal_resets_to_zero() {
        for status in [
            GoalStatus::Paused,
            GoalStatus::Cancelled,
            GoalStatus::Completed,
        ] {
            let mut s = streak(4);
            recompute_on_append(&mut s, status, Some(day(0)), day(1));
            assert_eq!(s.current, 0);
        }
    }

    #[test]
    fn test_target_reached() {
        assert!(!target_reached(&streak(6)));
        assert!(target_reached(&streak(7)));
        assert!(target_reached(&streak(9)));
    }
}
