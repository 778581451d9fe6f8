//! Handlers for the per-contest detail collections: tasks, team members,
//! and schedules. Each kind gets the same read + item-level trio.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use palmares_core::details::{DetailKind, ScheduleItem, Task, TeamMember};
use palmares_core::error::CoreError;
use palmares_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeUser;
use crate::response::DataResponse;
use crate::services::details::{
    self, AddScheduleItem, AddTask, AddTeamMember, UpdateScheduleItem, UpdateTask,
    UpdateTeamMember,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// GET /api/v1/contests/{id}/tasks
pub async fn list_tasks(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let tasks = details::load_items(&state, auth.principal(), contest_id, DetailKind::Tasks).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// PUT /api/v1/contests/{id}/tasks
///
/// Replace the whole checklist in one write.
pub async fn replace_tasks(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(tasks): Json<Vec<Task>>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let tasks = details::replace_tasks(&state, auth.principal(), contest_id, tasks).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/v1/contests/{id}/tasks
pub async fn add_task(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(input): Json<AddTask>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    let task = details::add_task(&state, auth.principal(), contest_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PUT /api/v1/contests/{id}/tasks/{task_id}
pub async fn update_task(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path((contest_id, task_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = details::update_task(&state, auth.principal(), contest_id, task_id, input).await?;
    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/contests/{id}/tasks/{task_id}
pub async fn remove_task(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path((contest_id, task_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed = details::remove_task(&state, auth.principal(), contest_id, task_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Team members
// ---------------------------------------------------------------------------

/// GET /api/v1/contests/{id}/team-members
pub async fn list_team_members(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TeamMember>>>> {
    let members =
        details::load_items(&state, auth.principal(), contest_id, DetailKind::TeamMembers).await?;
    Ok(Json(DataResponse { data: members }))
}

/// PUT /api/v1/contests/{id}/team-members
pub async fn replace_team_members(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(members): Json<Vec<TeamMember>>,
) -> AppResult<Json<DataResponse<Vec<TeamMember>>>> {
    let members =
        details::replace_team_members(&state, auth.principal(), contest_id, members).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/contests/{id}/team-members
pub async fn add_team_member(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(input): Json<AddTeamMember>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    let member = details::add_team_member(&state, auth.principal(), contest_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PUT /api/v1/contests/{id}/team-members/{member_id}
pub async fn update_team_member(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path((contest_id, member_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<Json<DataResponse<TeamMember>>> {
    let member =
        details::update_team_member(&state, auth.principal(), contest_id, member_id, input).await?;
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/v1/contests/{id}/team-members/{member_id}
pub async fn remove_team_member(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path((contest_id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed =
        details::remove_team_member(&state, auth.principal(), contest_id, member_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TeamMember",
            id: member_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

/// GET /api/v1/contests/{id}/schedules
pub async fn list_schedules(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ScheduleItem>>>> {
    let items =
        details::load_items(&state, auth.principal(), contest_id, DetailKind::Schedules).await?;
    Ok(Json(DataResponse { data: items }))
}

/// PUT /api/v1/contests/{id}/schedules
pub async fn replace_schedules(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(items): Json<Vec<ScheduleItem>>,
) -> AppResult<Json<DataResponse<Vec<ScheduleItem>>>> {
    let items = details::replace_schedules(&state, auth.principal(), contest_id, items).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/contests/{id}/schedules
pub async fn add_schedule_item(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path(contest_id): Path<DbId>,
    Json(input): Json<AddScheduleItem>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    let item = details::add_schedule_item(&state, auth.principal(), contest_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/contests/{id}/schedules/{item_id}
pub async fn update_schedule_item(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path((contest_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateScheduleItem>,
) -> AppResult<Json<DataResponse<ScheduleItem>>> {
    let item =
        details::update_schedule_item(&state, auth.principal(), contest_id, item_id, input).await?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/contests/{id}/schedules/{item_id}
pub async fn remove_schedule_item(
    auth: MaybeUser,
    State(state): State<AppState>,
    Path((contest_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed =
        details::remove_schedule_item(&state, auth.principal(), contest_id, item_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ScheduleItem",
            id: item_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
