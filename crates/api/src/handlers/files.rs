//! Handlers for file uploads and metadata.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use palmares_core::types::DbId;
use palmares_db::models::file::FileItem;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::response::DataResponse;
use crate::services::files::{self, UploadInput};
use crate::state::AppState;

/// Per-file entry in the batch-upload response.
#[derive(Debug, Serialize)]
pub struct UploadReport {
    pub name: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/v1/contests/{id}/files
pub async fn list(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FileItem>>>> {
    let files = files::list(&state, auth.principal(), contest_id).await?;
    Ok(Json(DataResponse { data: files }))
}

/// POST /api/v1/contests/{id}/files
///
/// Multipart batch upload. Every `file` part is processed independently;
/// the response reports success or failure per file, so one rejected file
/// does not sink the rest of the batch.
pub async fn upload(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut inputs = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart body: {err}")))?
    {
        let name = field
            .file_name()
            .map(str::to_string)
            .or_else(|| field.name().map(str::to_string))
            .unwrap_or_else(|| "unnamed".to_string());
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("Failed to read upload: {err}")))?;
        inputs.push(UploadInput {
            name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    if inputs.is_empty() {
        return Err(AppError::BadRequest("No files in upload".to_string()));
    }

    let outcomes = files::upload_batch(&state, auth.principal(), contest_id, inputs).await?;
    let reports: Vec<UploadReport> = outcomes
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok(file) => UploadReport {
                name: outcome.name,
                ok: true,
                file: Some(file),
                error: None,
            },
            Err(err) => UploadReport {
                name: outcome.name,
                ok: false,
                file: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    Ok((StatusCode::CREATED, Json(DataResponse { data: reports })))
}

/// DELETE /api/v1/files/{id}
pub async fn delete(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(file_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    files::delete(&state, auth.principal(), file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
