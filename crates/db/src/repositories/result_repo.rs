//! Repository for the `contest_results` table (at most one row per contest).

use sqlx::PgPool;

use palmares_core::types::DbId;

use crate::models::result::{ContestResult, CreateResult, UpdateResult};

/// Column list for `contest_results` queries.
const COLUMNS: &str = "id, contest_id, user_id, description, status, prize_amount, \
     feedback, announcement_date, file_ids, created_at, updated_at";

/// Provides CRUD operations for contest results.
pub struct ResultRepo;

impl ResultRepo {
    /// Insert the result for a contest, returning the created row. Fails
    /// with a unique-constraint violation if one already exists.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
        input: &CreateResult,
    ) -> Result<ContestResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO contest_results \
             (contest_id, user_id, description, status, prize_amount, feedback, \
              announcement_date, file_ids) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContestResult>(&query)
            .bind(contest_id)
            .bind(user_id)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.prize_amount)
            .bind(&input.feedback)
            .bind(input.announcement_date)
            .bind(&input.file_ids)
            .fetch_one(pool)
            .await
    }

    /// Fetch the result recorded for a contest, if any.
    pub async fn get_for_contest(
        pool: &PgPool,
        contest_id: DbId,
    ) -> Result<Option<ContestResult>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contest_results WHERE contest_id = $1");
        sqlx::query_as::<_, ContestResult>(&query)
            .bind(contest_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update to a contest's result. Returns `None` if the
    /// contest has no result row owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
        input: &UpdateResult,
    ) -> Result<Option<ContestResult>, sqlx::Error> {
        let query = format!(
            "UPDATE contest_results SET \
                description = COALESCE($3, description), \
                status = COALESCE($4, status), \
                prize_amount = COALESCE($5, prize_amount), \
                feedback = COALESCE($6, feedback), \
                announcement_date = COALESCE($7, announcement_date), \
                file_ids = COALESCE($8, file_ids), \
                updated_at = NOW() \
             WHERE contest_id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContestResult>(&query)
            .bind(contest_id)
            .bind(user_id)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.prize_amount)
            .bind(&input.feedback)
            .bind(input.announcement_date)
            .bind(&input.file_ids)
            .fetch_optional(pool)
            .await
    }

    /// Delete the result for a contest. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM contest_results WHERE contest_id = $1 AND user_id = $2")
                .bind(contest_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
