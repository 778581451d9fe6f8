//! Repository for the `contests` table.

use sqlx::PgPool;

use palmares_core::types::DbId;

use crate::models::contest::{Contest, CreateContest, UpdateContest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, organization, category, description, theme, \
     submission_format, schedule_note, prize, precautions, result_announcement, url, \
     status, progress, deadline, team_members_count, created_at, updated_at";

/// Provides CRUD operations for contests.
pub struct ContestRepo;

impl ContestRepo {
    /// Insert a new contest owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateContest,
    ) -> Result<Contest, sqlx::Error> {
        let query = format!(
            "INSERT INTO contests (user_id, title, organization, category, description, \
             theme, submission_format, schedule_note, prize, precautions, \
             result_announcement, url, status, progress, deadline) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''), \
             COALESCE($6, ''), COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, ''), \
             COALESCE($10, ''), COALESCE($11, ''), COALESCE($12, ''), \
             COALESCE($13, 'preparing'), COALESCE($14, 0), $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contest>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.organization)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.theme)
            .bind(&input.submission_format)
            .bind(&input.schedule_note)
            .bind(&input.prize)
            .bind(&input.precautions)
            .bind(&input.result_announcement)
            .bind(&input.url)
            .bind(&input.status)
            .bind(input.progress)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a contest by id. Contests are publicly browsable, so there is
    /// no owner filter on reads.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contests WHERE id = $1");
        sqlx::query_as::<_, Contest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contests, newest first. The public "all" browsing list.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Contest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contests ORDER BY created_at DESC");
        sqlx::query_as::<_, Contest>(&query).fetch_all(pool).await
    }

    /// List contests owned by `user_id`, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Contest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contests WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Contest>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update to a contest owned by `user_id`. Only
    /// non-`None` fields are applied.
    ///
    /// Returns `None` if no row matches the (id, owner) pair.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateContest,
    ) -> Result<Option<Contest>, sqlx::Error> {
        let query = format!(
            "UPDATE contests SET \
                title = COALESCE($3, title), \
                organization = COALESCE($4, organization), \
                category = COALESCE($5, category), \
                description = COALESCE($6, description), \
                theme = COALESCE($7, theme), \
                submission_format = COALESCE($8, submission_format), \
                schedule_note = COALESCE($9, schedule_note), \
                prize = COALESCE($10, prize), \
                precautions = COALESCE($11, precautions), \
                result_announcement = COALESCE($12, result_announcement), \
                url = COALESCE($13, url), \
                status = COALESCE($14, status), \
                progress = COALESCE($15, progress), \
                deadline = COALESCE($16, deadline), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contest>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.organization)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.theme)
            .bind(&input.submission_format)
            .bind(&input.schedule_note)
            .bind(&input.prize)
            .bind(&input.precautions)
            .bind(&input.result_announcement)
            .bind(&input.url)
            .bind(&input.status)
            .bind(input.progress)
            .bind(input.deadline)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the stored progress (used by the task-derived
    /// reconciliation). Returns the updated row.
    pub async fn set_progress(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        progress: i32,
    ) -> Result<Option<Contest>, sqlx::Error> {
        let query = format!(
            "UPDATE contests SET progress = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contest>(&query)
            .bind(id)
            .bind(user_id)
            .bind(progress)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the cached team-member count.
    pub async fn set_team_members_count(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        count: i32,
    ) -> Result<Option<Contest>, sqlx::Error> {
        let query = format!(
            "UPDATE contests SET team_members_count = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contest>(&query)
            .bind(id)
            .bind(user_id)
            .bind(count)
            .fetch_optional(pool)
            .await
    }

    /// Delete a contest owned by `user_id`. Child rows cascade at the
    /// database level. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contests WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
