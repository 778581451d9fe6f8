//! Contest entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use palmares_core::types::{DbId, Timestamp};

/// A row from the `contests` table (or the local `contests` collection;
/// local-mode records carry `user_id: None`).
///
/// `days_left` is deliberately absent: it is derived on every read and
/// attached at the API view layer, never stored.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub title: String,
    pub organization: String,
    pub category: String,
    pub description: String,
    pub theme: String,
    pub submission_format: String,
    pub schedule_note: String,
    pub prize: String,
    pub precautions: String,
    pub result_announcement: String,
    pub url: String,
    pub status: String,
    pub progress: i32,
    pub deadline: Option<Timestamp>,
    pub team_members_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a contest.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateContest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub submission_format: Option<String>,
    #[serde(default)]
    pub schedule_note: Option<String>,
    #[serde(default)]
    pub prize: Option<String>,
    #[serde(default)]
    pub precautions: Option<String>,
    #[serde(default)]
    pub result_announcement: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Defaults to `preparing`.
    #[serde(default)]
    pub status: Option<String>,
    /// Free-form progress, honored until the first task is added.
    #[validate(range(min = 0, max = 100))]
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
}

/// DTO for partial contest updates. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub organization: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub submission_format: Option<String>,
    pub schedule_note: Option<String>,
    pub prize: Option<String>,
    pub precautions: Option<String>,
    pub result_announcement: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub progress: Option<i32>,
    pub deadline: Option<Timestamp>,
}
