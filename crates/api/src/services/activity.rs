//! Fire-and-forget activity log and statistics side effects.
//!
//! These fire only on the authenticated path and are deliberately
//! detached from the request: the primary mutation has already committed
//! when they run, and a failure here is logged, never surfaced to the
//! caller.

use palmares_core::types::DbId;
use palmares_db::repositories::{UserRepo, STAT_CONTESTS_CREATED, STAT_FILES_UPLOADED};

use crate::state::AppState;

/// Record a contest creation: one activity entry plus the
/// `contests_created` counter.
pub fn record_contest_created(state: &AppState, user_id: DbId, contest_id: DbId, title: &str) {
    spawn_side_effect(
        state,
        user_id,
        Some(contest_id),
        "contest_created",
        title.to_string(),
        STAT_CONTESTS_CREATED,
    );
}

/// Record a file upload: one activity entry plus the `files_uploaded`
/// counter.
pub fn record_file_uploaded(state: &AppState, user_id: DbId, contest_id: DbId, file_name: &str) {
    spawn_side_effect(
        state,
        user_id,
        Some(contest_id),
        "file_uploaded",
        file_name.to_string(),
        STAT_FILES_UPLOADED,
    );
}

fn spawn_side_effect(
    state: &AppState,
    user_id: DbId,
    contest_id: Option<DbId>,
    action: &'static str,
    detail: String,
    counter: &'static str,
) {
    let pool = state.pool.clone();
    tokio::spawn(async move {
        if let Err(err) =
            UserRepo::log_activity(&pool, user_id, action, Some(&detail), contest_id).await
        {
            tracing::warn!(user_id, action, error = %err, "Failed to log activity");
        }
        if let Err(err) = UserRepo::increment_statistic(&pool, user_id, counter).await {
            tracing::warn!(user_id, counter, error = %err, "Failed to bump statistic");
        }
    });
}
