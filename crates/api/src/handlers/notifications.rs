//! Handlers for the `/notifications` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use palmares_core::types::DbId;
use palmares_db::models::notification::{CreateNotification, Notification};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::response::DataResponse;
use crate::services::notifications;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
}

/// GET /api/v1/notifications
pub async fn list(
    auth: MaybeUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let unread_only = params.unread_only.unwrap_or(false);
    let notifications = notifications::list(&state, auth.principal(), unread_only).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications
pub async fn create(
    auth: MaybeUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(AppError::from_validation)?;
    let notification = notifications::add(&state, auth.principal(), &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: notification }),
    ))
}

/// POST /api/v1/notifications/{id}/read
///
/// Idempotent: re-marking an already-read notification returns 204 again.
pub async fn mark_read(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    notifications::mark_read(&state, auth.principal(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: MaybeUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = notifications::mark_all_read(&state, auth.principal()).await?;
    Ok(Json(json!({ "data": { "marked_read": count } })))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: MaybeUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = notifications::unread_count(&state, auth.principal()).await?;
    Ok(Json(json!({ "data": { "count": count } })))
}
