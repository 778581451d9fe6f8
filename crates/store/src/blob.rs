//! Object storage for uploaded file bytes.
//!
//! Entity rows only carry metadata; the bytes go through a [`BlobStore`]
//! provider that hands back a public URL. The filesystem provider below is
//! the default; the trait seam exists so a bucket-backed provider can be
//! swapped in without touching the upload flow.

use std::path::PathBuf;

use async_trait::async_trait;

/// Errors from blob-storage operations.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Blob I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid blob key '{0}'")]
    InvalidKey(String),
}

/// A bucket-like store for raw file content.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `key`, returning the public URL of the object.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, BlobError>;

    /// Delete the object stored under `key`. Deleting a missing object is
    /// not an error.
    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Whether an object exists under `key`.
    async fn exists(&self, key: &str) -> bool;
}

/// Filesystem-backed blob store serving objects from a base URL.
pub struct FsBlobStore {
    root: PathBuf,
    public_base: String,
}

impl FsBlobStore {
    /// Open (and create if needed) a blob store rooted at `root`.
    ///
    /// `public_base` is the URL prefix under which the root is served,
    /// e.g. `http://localhost:3000/blobs`.
    pub fn open(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Result<Self, BlobError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_base: public_base.into().trim_end_matches('/').to_string(),
        })
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, BlobError> {
        // Keys may contain one directory level (`<contest_id>/<object>`).
        // Validation is per path component, so a filename like
        // `final..draft.png` is fine while `.` and `..` components are not.
        let valid = !key.is_empty()
            && key.split('/').all(|part| {
                !part.is_empty()
                    && part != "."
                    && part != ".."
                    && part
                        .bytes()
                        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
            });
        if !valid {
            return Err(BlobError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<String, BlobError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(format!("{}/{key}", self.public_base))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn exists(&self, key: &str) -> bool {
        match self.resolve(key) {
            Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_returns_public_url_and_stores_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path(), "http://localhost:3000/blobs/").unwrap();

        let url = store
            .put("17/abc_poster.png", b"bytes", "image/png")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:3000/blobs/17/abc_poster.png");
        assert!(store.exists("17/abc_poster.png").await);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path(), "http://x").unwrap();

        store.put("a.txt", b"x", "text/plain").await.unwrap();
        store.delete("a.txt").await.unwrap();
        assert!(!store.exists("a.txt").await);
        // Second delete of the same key is still Ok.
        store.delete("a.txt").await.unwrap();
    }

    #[tokio::test]
    async fn path_escapes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path(), "http://x").unwrap();

        assert!(store.put("../outside", b"x", "text/plain").await.is_err());
        assert!(store.put("7/../outside", b"x", "text/plain").await.is_err());
        assert!(store.put("/absolute", b"x", "text/plain").await.is_err());
        assert!(store.put("7/.", b"x", "text/plain").await.is_err());
    }

    #[tokio::test]
    async fn dot_runs_inside_a_name_are_valid() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::open(dir.path(), "http://x").unwrap();

        let url = store
            .put("7/abc_final..draft.png", b"x", "image/png")
            .await
            .unwrap();
        assert_eq!(url, "http://x/7/abc_final..draft.png");
        assert!(store.exists("7/abc_final..draft.png").await);
    }
}
