//! Handlers for generation prompts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use palmares_core::error::CoreError;
use palmares_core::types::DbId;
use palmares_db::models::prompt::{CreatePrompt, Prompt, UpdatePrompt};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::response::DataResponse;
use crate::services::prompts;
use crate::state::AppState;

/// GET /api/v1/contests/{id}/prompts
pub async fn list(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Prompt>>>> {
    let prompts = prompts::list(&state, auth.principal(), contest_id).await?;
    Ok(Json(DataResponse { data: prompts }))
}

/// POST /api/v1/contests/{id}/prompts
pub async fn create(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(input): Json<CreatePrompt>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(AppError::from_validation)?;
    let prompt = prompts::add(&state, auth.principal(), contest_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: prompt })))
}

/// PUT /api/v1/prompts/{id}
pub async fn update(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
    Json(input): Json<UpdatePrompt>,
) -> AppResult<Json<DataResponse<Prompt>>> {
    let prompt = prompts::update(&state, auth.principal(), prompt_id, &input).await?;
    Ok(Json(DataResponse { data: prompt }))
}

/// Body for `POST /prompts/{id}/link-file`.
#[derive(Debug, Deserialize)]
pub struct LinkFileBody {
    pub file_id: DbId,
}

/// POST /api/v1/prompts/{id}/link-file
pub async fn link_file(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
    Json(body): Json<LinkFileBody>,
) -> AppResult<Json<DataResponse<Prompt>>> {
    let prompt = prompts::link_file(&state, auth.principal(), prompt_id, body.file_id).await?;
    Ok(Json(DataResponse { data: prompt }))
}

/// DELETE /api/v1/prompts/{id}
pub async fn delete(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = prompts::delete(&state, auth.principal(), prompt_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
