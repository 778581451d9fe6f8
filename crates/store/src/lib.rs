//! Device-local persistence and blob storage.
//!
//! [`local`] holds the unauthenticated-mode store: JSON collections on
//! disk, one file per `<entity>_<contestId>` key, schema-compatible with
//! the Postgres rows so the two stores round-trip identically.
//!
//! [`blob`] holds the object-storage provider trait and its filesystem
//! implementation. File bytes live here; only metadata goes to the
//! entity stores.

pub mod blob;
pub mod local;

pub use blob::{BlobError, BlobStore, FsBlobStore};
pub use local::{Collection, LocalStore, StoreError};
