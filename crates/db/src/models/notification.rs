//! Notification entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use palmares_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// `contest_id` is optional deep-link context, not a required foreign key.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub contest_id: Option<DbId>,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotification {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// One of: info, success, warning, error. Defaults to `info`.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub contest_id: Option<DbId>,
}
