//! User aggregate models: statistics counters and the activity log.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use palmares_core::types::{DbId, Timestamp};

/// A row from the `user_statistics` table. Counters are incremented
/// best-effort after successful primary operations.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserStatistics {
    pub user_id: DbId,
    pub contests_created: i64,
    pub files_uploaded: i64,
    pub updated_at: Timestamp,
}

/// A row from the `user_activities` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserActivity {
    pub id: DbId,
    pub user_id: DbId,
    pub contest_id: Option<DbId>,
    pub action: String,
    pub detail: Option<String>,
    pub created_at: Timestamp,
}
