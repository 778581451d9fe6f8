//! Derived contest state: days left until the deadline, progress from the
//! task checklist, and the urgency bucket.
//!
//! These values are recomputed on every read. Stored copies go stale
//! against wall-clock time, so nothing here is ever trusted from storage.

use serde::Serialize;

use crate::details::Task;
use crate::types::Timestamp;

/// Milliseconds in one day.
const MS_PER_DAY: i64 = 86_400_000;

/// Whole days remaining until `deadline`, rounded up, never negative.
///
/// A missing deadline counts as 0 days left.
pub fn days_left(deadline: Option<Timestamp>, now: Timestamp) -> i64 {
    let Some(deadline) = deadline else {
        return 0;
    };
    let remaining_ms = (deadline - now).num_milliseconds();
    if remaining_ms <= 0 {
        0
    } else {
        (remaining_ms + MS_PER_DAY - 1) / MS_PER_DAY
    }
}

/// Completion percentage derived from a task checklist.
///
/// Returns `round(100 * completed / total)`, clamped to `[0, 100]`. An
/// empty checklist yields `fallback` (the prior explicitly-set progress),
/// so free-form progress survives until the first task is added.
pub fn progress_from_tasks(tasks: &[Task], fallback: i32) -> i32 {
    if tasks.is_empty() {
        return fallback.clamp(0, 100);
    }
    let completed = tasks.iter().filter(|t| t.completed).count() as f64;
    let total = tasks.len() as f64;
    (100.0 * completed / total).round().clamp(0.0, 100.0) as i32
}

/// Deadline urgency bucket. Presentation-tier only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Three days or less remaining.
    Urgent,
    /// Between four and seven days remaining.
    Warning,
    /// More than a week remaining.
    Normal,
}

impl Urgency {
    /// Bucket a days-left value.
    pub fn from_days_left(days: i64) -> Self {
        if days <= 3 {
            Self::Urgent
        } else if days <= 7 {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Warning => "warning",
            Self::Normal => "normal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn task(completed: bool) -> Task {
        Task {
            id: 1,
            title: "t".to_string(),
            completed,
        }
    }

    #[test]
    fn past_deadlines_have_zero_days_left() {
        let now = Utc::now();
        assert_eq!(days_left(Some(now - Duration::days(1)), now), 0);
        assert_eq!(days_left(Some(now - Duration::milliseconds(1)), now), 0);
        assert_eq!(days_left(Some(now - Duration::days(400)), now), 0);
    }

    #[test]
    fn whole_days_in_the_future_count_exactly() {
        let now = Utc::now();
        for n in [1, 5, 30, 365] {
            assert_eq!(days_left(Some(now + Duration::days(n)), now), n);
        }
    }

    #[test]
    fn partial_days_round_up() {
        let now = Utc::now();
        let deadline = now + Duration::days(2) + Duration::hours(1);
        assert_eq!(days_left(Some(deadline), now), 3);
        assert_eq!(days_left(Some(now + Duration::minutes(5)), now), 1);
    }

    #[test]
    fn missing_deadline_counts_as_zero() {
        assert_eq!(days_left(None, Utc::now()), 0);
    }

    #[test]
    fn progress_is_rounded_percentage_of_completed_tasks() {
        let tasks = vec![task(true), task(true), task(false), task(false)];
        assert_eq!(progress_from_tasks(&tasks, 0), 50);

        let tasks = vec![task(true), task(false), task(false)];
        assert_eq!(progress_from_tasks(&tasks, 0), 33);
    }

    #[test]
    fn progress_is_100_iff_every_task_is_completed() {
        let all_done = vec![task(true), task(true)];
        assert_eq!(progress_from_tasks(&all_done, 0), 100);

        let one_open = vec![task(true), task(true), task(false)];
        assert!(progress_from_tasks(&one_open, 0) < 100);
    }

    #[test]
    fn empty_checklist_retains_the_fallback_value() {
        assert_eq!(progress_from_tasks(&[], 40), 40);
        assert_eq!(progress_from_tasks(&[], 0), 0);
        // Fallback is still clamped to the valid range.
        assert_eq!(progress_from_tasks(&[], 150), 100);
        assert_eq!(progress_from_tasks(&[], -5), 0);
    }

    #[test]
    fn progress_stays_within_bounds() {
        let tasks: Vec<Task> = (0..7).map(|i| task(i % 2 == 0)).collect();
        let progress = progress_from_tasks(&tasks, 0);
        assert!((0..=100).contains(&progress));
    }

    #[test]
    fn urgency_buckets() {
        assert_eq!(Urgency::from_days_left(0), Urgency::Urgent);
        assert_eq!(Urgency::from_days_left(3), Urgency::Urgent);
        assert_eq!(Urgency::from_days_left(4), Urgency::Warning);
        assert_eq!(Urgency::from_days_left(5), Urgency::Warning);
        assert_eq!(Urgency::from_days_left(7), Urgency::Warning);
        assert_eq!(Urgency::from_days_left(8), Urgency::Normal);
        assert_eq!(Urgency::from_days_left(90), Urgency::Normal);
    }
}
