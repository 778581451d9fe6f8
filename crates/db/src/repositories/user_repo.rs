//! Repository for the user aggregate tables: profiles, statistics
//! counters, and the activity log.

use sqlx::PgPool;

use palmares_core::types::DbId;

use crate::models::user::{UserActivity, UserStatistics};

/// Statistics counter names.
pub const STAT_CONTESTS_CREATED: &str = "contests_created";
pub const STAT_FILES_UPLOADED: &str = "files_uploaded";

/// Provides access to user profiles, statistics, and activities.
pub struct UserRepo;

impl UserRepo {
    /// Fetch a user's statistics row, creating a zeroed one on first read.
    pub async fn get_statistics(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<UserStatistics, sqlx::Error> {
        sqlx::query_as::<_, UserStatistics>(
            "INSERT INTO user_statistics (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING user_id, contests_created, files_uploaded, updated_at",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Increment one statistics counter by 1, creating the row if needed.
    ///
    /// `counter` must be one of the `STAT_*` constants; anything else is
    /// rejected before touching the database (column names cannot be
    /// bound as parameters).
    pub async fn increment_statistic(
        pool: &PgPool,
        user_id: DbId,
        counter: &str,
    ) -> Result<(), sqlx::Error> {
        if counter != STAT_CONTESTS_CREATED && counter != STAT_FILES_UPLOADED {
            return Err(sqlx::Error::Protocol(format!(
                "unknown statistics counter '{counter}'"
            )));
        }
        let query = format!(
            "INSERT INTO user_statistics (user_id, {counter}) VALUES ($1, 1) \
             ON CONFLICT (user_id) \
             DO UPDATE SET {counter} = user_statistics.{counter} + 1, updated_at = NOW()"
        );
        sqlx::query(&query).bind(user_id).execute(pool).await?;
        Ok(())
    }

    /// Append an activity-log entry.
    pub async fn log_activity(
        pool: &PgPool,
        user_id: DbId,
        action: &str,
        detail: Option<&str>,
        contest_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_activities (user_id, contest_id, action, detail) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(contest_id)
        .bind(action)
        .bind(detail)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List a user's recent activities, newest first.
    pub async fn list_activities(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<UserActivity>, sqlx::Error> {
        sqlx::query_as::<_, UserActivity>(
            "SELECT id, user_id, contest_id, action, detail, created_at \
             FROM user_activities WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
