//! Contest result model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use palmares_core::types::{DbId, Timestamp};

/// A row from the `contest_results` table. At most one per contest.
///
/// `status` is an open string: well-known values are in
/// `palmares_core::status` but organizers invent their own outcomes.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContestResult {
    pub id: DbId,
    pub contest_id: DbId,
    pub user_id: Option<DbId>,
    pub description: Option<String>,
    pub status: String,
    pub prize_amount: Option<String>,
    pub feedback: Option<String>,
    pub announcement_date: Timestamp,
    pub file_ids: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a result.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResult {
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "status must not be empty"))]
    pub status: String,
    #[serde(default)]
    pub prize_amount: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    pub announcement_date: Timestamp,
    #[serde(default)]
    pub file_ids: Option<serde_json::Value>,
}

/// DTO for partial result updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResult {
    pub description: Option<String>,
    pub status: Option<String>,
    pub prize_amount: Option<String>,
    pub feedback: Option<String>,
    pub announcement_date: Option<Timestamp>,
    pub file_ids: Option<serde_json::Value>,
}
