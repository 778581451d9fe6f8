//! Repository for the `contest_details` blob table.
//!
//! One JSON array per (contest, kind). There is no row-level granularity
//! and no optimistic concurrency: every mutation reads the whole payload,
//! rewrites it, and the last writer wins.

use sqlx::PgPool;

use palmares_core::types::DbId;

/// Provides blob read/write for per-contest detail collections.
pub struct DetailRepo;

impl DetailRepo {
    /// Read the payload for `(contest_id, kind)`, owner-scoped.
    ///
    /// Returns `None` when no blob has been written yet.
    pub async fn get_payload(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
        kind: &str,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT payload FROM contest_details \
             WHERE contest_id = $1 AND user_id = $2 AND kind = $3",
        )
        .bind(contest_id)
        .bind(user_id)
        .bind(kind)
        .fetch_optional(pool)
        .await
    }

    /// Overwrite the payload for `(contest_id, kind)`, creating the row on
    /// first write.
    pub async fn upsert_payload(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
        kind: &str,
        payload: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO contest_details (contest_id, user_id, kind, payload) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_contest_details_kind \
             DO UPDATE SET payload = EXCLUDED.payload, updated_at = NOW()",
        )
        .bind(contest_id)
        .bind(user_id)
        .bind(kind)
        .bind(payload)
        .execute(pool)
        .await?;
        Ok(())
    }
}
