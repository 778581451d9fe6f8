//! Generation-prompt model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use palmares_core::types::{DbId, Timestamp};

/// A row from the `contest_prompts` table.
///
/// The link to a produced file is the `file_id` foreign key; prompt text
/// is never copied onto the file record.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: DbId,
    pub contest_id: DbId,
    pub user_id: Option<DbId>,
    pub file_id: Option<DbId>,
    pub prompt_type: String,
    pub prompt_text: String,
    pub ai_model: Option<String>,
    pub generation_params: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for creating a prompt.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrompt {
    /// One of: image, document, video, audio, other.
    #[serde(default)]
    pub prompt_type: Option<String>,
    #[validate(length(min = 1, message = "prompt_text must not be empty"))]
    pub prompt_text: String,
    #[serde(default)]
    pub ai_model: Option<String>,
    #[serde(default)]
    pub generation_params: Option<serde_json::Value>,
    #[serde(default)]
    pub file_id: Option<DbId>,
}

/// DTO for partial prompt updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrompt {
    pub prompt_type: Option<String>,
    pub prompt_text: Option<String>,
    pub ai_model: Option<String>,
    pub generation_params: Option<serde_json::Value>,
}
