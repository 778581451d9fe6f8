//! Handlers for the `/contests` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use palmares_core::types::DbId;
use palmares_db::models::contest::{CreateContest, UpdateContest};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::response::{contest_views, ContestView, DataResponse};
use crate::services::contests::{self, ListScope};
use crate::state::AppState;

/// Query parameters for `GET /contests`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `mine` (default) or `all`.
    pub scope: Option<String>,
}

/// GET /api/v1/contests?scope=mine|all
///
/// `mine` is the caller's contests (local store when anonymous); `all` is
/// public browsing across every user and always reads the database.
pub async fn list(
    auth: MaybeUser,
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<DataResponse<Vec<ContestView>>>> {
    let scope = match params.scope.as_deref() {
        None | Some("mine") => ListScope::Mine,
        Some("all") => ListScope::All,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Unknown scope '{other}', expected 'mine' or 'all'"
            )))
        }
    };
    let contests = contests::list(&state, auth.principal(), scope).await?;
    Ok(Json(DataResponse {
        data: contest_views(contests),
    }))
}

/// GET /api/v1/contests/{id}
pub async fn get(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContestView>>> {
    let contest = contests::get(&state, auth.principal(), id).await?;
    Ok(Json(DataResponse {
        data: ContestView::now(contest),
    }))
}

/// POST /api/v1/contests
pub async fn create(
    auth: MaybeUser,
    State(state): State<AppState>,
    Json(input): Json<CreateContest>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(AppError::from_validation)?;
    let contest = contests::add(&state, auth.principal(), &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ContestView::now(contest),
        }),
    ))
}

/// PUT /api/v1/contests/{id}
pub async fn update(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContest>,
) -> AppResult<Json<DataResponse<ContestView>>> {
    input.validate().map_err(AppError::from_validation)?;
    let contest = contests::update(&state, auth.principal(), id, &input).await?;
    Ok(Json(DataResponse {
        data: ContestView::now(contest),
    }))
}

/// DELETE /api/v1/contests/{id}
pub async fn delete(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = contests::delete(&state, auth.principal(), id).await?;
    if !deleted {
        return Err(AppError::Core(palmares_core::error::CoreError::NotFound {
            entity: "Contest",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
