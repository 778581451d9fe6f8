//! Repository for the `contest_files` metadata table.

use sqlx::PgPool;

use palmares_core::types::DbId;

use crate::models::file::{CreateFile, FileItem};

/// Column list for `contest_files` queries.
const COLUMNS: &str =
    "id, contest_id, user_id, name, url, blob_key, content_type, size_bytes, uploaded_at";

/// Provides CRUD operations for file metadata.
pub struct FileRepo;

impl FileRepo {
    /// Insert a metadata record for already-uploaded bytes, returning the
    /// created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateFile,
    ) -> Result<FileItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO contest_files \
             (contest_id, user_id, name, url, blob_key, content_type, size_bytes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FileItem>(&query)
            .bind(input.contest_id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(&input.blob_key)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }

    /// List files for a contest owned by `user_id`, newest first.
    pub async fn list_for_contest(
        pool: &PgPool,
        user_id: DbId,
        contest_id: DbId,
    ) -> Result<Vec<FileItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contest_files \
             WHERE contest_id = $1 AND user_id = $2 \
             ORDER BY uploaded_at DESC"
        );
        sqlx::query_as::<_, FileItem>(&query)
            .bind(contest_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a file owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<FileItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contest_files WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, FileItem>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a file record owned by `user_id`. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contest_files WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
