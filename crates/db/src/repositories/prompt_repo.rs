//! Repository for the `contest_prompts` table.

use sqlx::PgPool;

use palmares_core::types::DbId;

use crate::models::prompt::{CreatePrompt, Prompt, UpdatePrompt};

/// Column list for `contest_prompts` queries.
const COLUMNS: &str = "id, contest_id, user_id, file_id, prompt_type, prompt_text, \
     ai_model, generation_params, created_at";

/// Provides CRUD operations for generation prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a prompt, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
        input: &CreatePrompt,
    ) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO contest_prompts \
             (contest_id, user_id, file_id, prompt_type, prompt_text, ai_model, generation_params) \
             VALUES ($1, $2, $3, COALESCE($4, 'other'), $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(contest_id)
            .bind(user_id)
            .bind(input.file_id)
            .bind(&input.prompt_type)
            .bind(&input.prompt_text)
            .bind(&input.ai_model)
            .bind(&input.generation_params)
            .fetch_one(pool)
            .await
    }

    /// List prompts for a contest owned by `user_id`, newest first.
    pub async fn list_for_contest(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
    ) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contest_prompts \
             WHERE contest_id = $1 AND user_id = $2 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(contest_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if no owned row matches.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdatePrompt,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE contest_prompts SET \
                prompt_type = COALESCE($3, prompt_type), \
                prompt_text = COALESCE($4, prompt_text), \
                ai_model = COALESCE($5, ai_model), \
                generation_params = COALESCE($6, generation_params) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.prompt_type)
            .bind(&input.prompt_text)
            .bind(&input.ai_model)
            .bind(&input.generation_params)
            .fetch_optional(pool)
            .await
    }

    /// Point a prompt at the file it produced. The link is this foreign
    /// key alone. Returns `None` if no owned row matches.
    pub async fn link_file(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        file_id: DbId,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!(
            "UPDATE contest_prompts SET file_id = $3 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(user_id)
            .bind(file_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a prompt owned by `user_id`. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contest_prompts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
