//! Dual-persistence services, one module per entity.
//!
//! Every operation follows the same contract: resolve the principal once,
//! then run against Postgres (principal present) or the device-local JSON
//! store (no principal). The two paths return identical record shapes.
//! A remote failure is a failure; it never falls back to local storage;
//! the local path exists for unauthenticated mode, not for resilience.

pub mod activity;
pub mod contests;
pub mod details;
pub mod files;
pub mod notifications;
pub mod prompts;
pub mod results;

use palmares_core::types::DbId;

/// The resolved caller identity. `None` selects the local-store path.
pub type Principal = Option<DbId>;

/// Storage key for a per-contest child collection, e.g. `files_17`.
pub(crate) fn scoped_key(entity: &str, contest_id: DbId) -> String {
    format!("{entity}_{contest_id}")
}
