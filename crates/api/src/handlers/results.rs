//! Handlers for the per-contest result record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use palmares_core::types::DbId;
use palmares_db::models::result::{ContestResult, CreateResult, UpdateResult};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::response::DataResponse;
use crate::services::results;
use crate::state::AppState;

/// GET /api/v1/contests/{id}/result
///
/// `data` is `null` when the contest has no recorded result yet; a
/// missing result is an empty state, not an error.
pub async fn get(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Option<ContestResult>>>> {
    let result = results::get(&state, auth.principal(), contest_id).await?;
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/contests/{id}/result
pub async fn create(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(input): Json<CreateResult>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(AppError::from_validation)?;
    let result = results::add(&state, auth.principal(), contest_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}

/// PUT /api/v1/contests/{id}/result
pub async fn update(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(input): Json<UpdateResult>,
) -> AppResult<Json<DataResponse<ContestResult>>> {
    let result = results::update(&state, auth.principal(), contest_id, &input).await?;
    Ok(Json(DataResponse { data: result }))
}

/// DELETE /api/v1/contests/{id}/result
pub async fn delete(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = results::delete(&state, auth.principal(), contest_id).await?;
    if !deleted {
        return Err(AppError::Core(palmares_core::error::CoreError::NotFound {
            entity: "ContestResult",
            id: contest_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
