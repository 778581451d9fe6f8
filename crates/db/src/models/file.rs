//! File metadata model. Bytes live in the blob store; this is the record
//! pointing at them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use palmares_core::types::{DbId, Timestamp};

/// A row from the `contest_files` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FileItem {
    pub id: DbId,
    pub contest_id: DbId,
    pub user_id: Option<DbId>,
    pub name: String,
    /// Public URL returned by the blob store.
    pub url: String,
    /// Blob-store key, kept so deletion can reach the bytes.
    pub blob_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: Timestamp,
}

/// Metadata for a file whose bytes were just uploaded.
#[derive(Debug, Clone)]
pub struct CreateFile {
    pub contest_id: DbId,
    pub name: String,
    pub url: String,
    pub blob_key: String,
    pub content_type: String,
    pub size_bytes: i64,
}
