//! Handlers for the authenticated user's own aggregates. These have no
//! local-mode counterpart: statistics and the activity log only exist for
//! signed-in users.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use palmares_db::models::user::{UserActivity, UserStatistics};
use palmares_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for the activity log.
const MAX_LIMIT: i64 = 100;

/// Default page size for the activity log.
const DEFAULT_LIMIT: i64 = 50;

/// GET /api/v1/users/me/statistics
pub async fn statistics(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserStatistics>>> {
    let stats = UserRepo::get_statistics(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// Query parameters for `GET /users/me/activities`.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
}

/// GET /api/v1/users/me/activities
pub async fn activities(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> AppResult<Json<DataResponse<Vec<UserActivity>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let activities = UserRepo::list_activities(&state.pool, auth.user_id, limit).await?;
    Ok(Json(DataResponse { data: activities }))
}
