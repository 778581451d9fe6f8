//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

use palmares_core::lifecycle::{days_left, Urgency};
use palmares_core::types::Timestamp;
use palmares_db::models::contest::Contest;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A contest plus its derived fields, computed at read time.
///
/// `days_left` and `urgency` are never read from storage: the stored copy
/// goes stale against wall-clock time.
#[derive(Debug, Serialize)]
pub struct ContestView {
    #[serde(flatten)]
    pub contest: Contest,
    pub days_left: i64,
    pub urgency: Urgency,
}

impl ContestView {
    /// Attach derived fields as of `now`.
    pub fn at(contest: Contest, now: Timestamp) -> Self {
        let days = days_left(contest.deadline, now);
        Self {
            contest,
            days_left: days,
            urgency: Urgency::from_days_left(days),
        }
    }

    /// Attach derived fields as of the current instant.
    pub fn now(contest: Contest) -> Self {
        Self::at(contest, chrono::Utc::now())
    }
}

/// Map a list of contests to views in one pass, sharing a single `now`.
pub fn contest_views(contests: Vec<Contest>) -> Vec<ContestView> {
    let now = chrono::Utc::now();
    contests
        .into_iter()
        .map(|contest| ContestView::at(contest, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn contest(deadline: Option<Timestamp>) -> Contest {
        let now = Utc::now();
        Contest {
            id: 1,
            user_id: None,
            title: "Poster Contest".into(),
            organization: String::new(),
            category: String::new(),
            description: String::new(),
            theme: String::new(),
            submission_format: String::new(),
            schedule_note: String::new(),
            prize: String::new(),
            precautions: String::new(),
            result_announcement: String::new(),
            url: String::new(),
            status: "preparing".into(),
            progress: 40,
            deadline,
            team_members_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn view_attaches_days_left_and_urgency() {
        let now = Utc::now();
        let view = ContestView::at(contest(Some(now + Duration::days(5))), now);
        assert_eq!(view.days_left, 5);
        assert_eq!(view.urgency, Urgency::Warning);
        // Explicit progress is untouched by the view.
        assert_eq!(view.contest.progress, 40);
    }

    #[test]
    fn view_serializes_flattened_with_derived_fields() {
        let now = Utc::now();
        let view = ContestView::at(contest(None), now);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["title"], "Poster Contest");
        assert_eq!(json["days_left"], 0);
        assert_eq!(json["urgency"], "urgent");
    }
}
