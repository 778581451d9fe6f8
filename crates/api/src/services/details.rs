//! Per-contest detail blobs: tasks, team members, schedules.
//!
//! Each collection is one JSON array per (contest, kind). Every mutation
//! is read-entire-blob, mutate in memory, write-entire-blob, with no
//! optimistic concurrency: two writers racing on the same blob will
//! silently last-write-win. Task mutations re-derive the parent contest's
//! progress; team mutations refresh its team-member count.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use palmares_core::details::{DetailKind, ScheduleItem, Task, TeamMember};
use palmares_core::error::CoreError;
use palmares_core::lifecycle::progress_from_tasks;
use palmares_core::types::{DbId, Timestamp};
use palmares_db::repositories::DetailRepo;
use palmares_store::local::next_id;

use crate::error::{AppError, AppResult};
use crate::services::{contests, scoped_key, Principal};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Blob primitives
// ---------------------------------------------------------------------------

/// Read a whole detail collection. A missing blob is an empty collection;
/// a malformed payload is logged and also reads as empty.
pub async fn load_items<T>(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    kind: DetailKind,
) -> AppResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    match principal {
        Some(user_id) => {
            let payload =
                DetailRepo::get_payload(&state.pool, user_id, contest_id, kind.as_str()).await?;
            Ok(payload
                .map(|value| {
                    serde_json::from_value(value).unwrap_or_else(|err| {
                        tracing::warn!(
                            contest_id,
                            kind = kind.as_str(),
                            error = %err,
                            "Malformed detail payload, treating as empty"
                        );
                        Vec::new()
                    })
                })
                .unwrap_or_default())
        }
        None => Ok(state
            .local
            .collection::<T>(&scoped_key(kind.as_str(), contest_id))?
            .load()),
    }
}

/// Overwrite a whole detail collection.
async fn save_items<T>(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    kind: DetailKind,
    items: &[T],
) -> AppResult<()>
where
    T: Serialize + DeserializeOwned,
{
    match principal {
        Some(user_id) => {
            let payload = serde_json::to_value(items)
                .map_err(|err| AppError::InternalError(err.to_string()))?;
            DetailRepo::upsert_payload(&state.pool, user_id, contest_id, kind.as_str(), &payload)
                .await?;
            Ok(())
        }
        None => {
            state
                .local
                .collection::<T>(&scoped_key(kind.as_str(), contest_id))?
                .save(items)?;
            Ok(())
        }
    }
}

/// Drop a local detail collection. Used when a local-mode contest is
/// deleted (the remote path cascades at the database level).
pub fn clear_local(state: &AppState, contest_id: DbId, kind: DetailKind) -> AppResult<()> {
    state
        .local
        .collection::<serde_json::Value>(&scoped_key(kind.as_str(), contest_id))?
        .save(&[])?;
    Ok(())
}

/// Shorthand used by the contest service's progress reconciliation.
pub async fn load_tasks(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
) -> AppResult<Vec<Task>> {
    load_items(state, principal, contest_id, DetailKind::Tasks).await
}

/// Replace a whole task checklist, re-deriving the contest's progress.
pub async fn replace_tasks(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    tasks: Vec<Task>,
) -> AppResult<Vec<Task>> {
    contests::get(state, principal, contest_id).await?;
    save_items(state, principal, contest_id, DetailKind::Tasks, &tasks).await?;
    sync_progress(state, principal, contest_id, &tasks).await?;
    Ok(tasks)
}

/// Replace a whole team-member list, refreshing the contest's count.
pub async fn replace_team_members(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    members: Vec<TeamMember>,
) -> AppResult<Vec<TeamMember>> {
    contests::get(state, principal, contest_id).await?;
    save_items(state, principal, contest_id, DetailKind::TeamMembers, &members).await?;
    sync_team_count(state, principal, contest_id, members.len()).await?;
    Ok(members)
}

/// Replace a whole schedule.
pub async fn replace_schedules(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    items: Vec<ScheduleItem>,
) -> AppResult<Vec<ScheduleItem>> {
    contests::get(state, principal, contest_id).await?;
    save_items(state, principal, contest_id, DetailKind::Schedules, &items).await?;
    Ok(items)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// DTO for adding a task.
#[derive(Debug, Deserialize)]
pub struct AddTask {
    pub title: String,
}

/// DTO for patching a task.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

pub async fn add_task(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    input: AddTask,
) -> AppResult<Task> {
    // Parent must exist on both paths (the blob table has no row until
    // first write, so the FK alone does not cover the local store).
    contests::get(state, principal, contest_id).await?;

    let mut tasks: Vec<Task> = load_items(state, principal, contest_id, DetailKind::Tasks).await?;
    let task = Task {
        id: next_id(&tasks, |t| t.id),
        title: input.title,
        completed: false,
    };
    tasks.push(task.clone());
    save_items(state, principal, contest_id, DetailKind::Tasks, &tasks).await?;
    sync_progress(state, principal, contest_id, &tasks).await?;
    Ok(task)
}

pub async fn update_task(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    task_id: DbId,
    input: UpdateTask,
) -> AppResult<Task> {
    let mut tasks: Vec<Task> = load_items(state, principal, contest_id, DetailKind::Tasks).await?;
    let task = {
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Task",
                id: task_id,
            }))?;
        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(completed) = input.completed {
            task.completed = completed;
        }
        task.clone()
    };
    save_items(state, principal, contest_id, DetailKind::Tasks, &tasks).await?;
    sync_progress(state, principal, contest_id, &tasks).await?;
    Ok(task)
}

pub async fn remove_task(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    task_id: DbId,
) -> AppResult<bool> {
    let mut tasks: Vec<Task> = load_items(state, principal, contest_id, DetailKind::Tasks).await?;
    let before = tasks.len();
    tasks.retain(|t| t.id != task_id);
    if tasks.len() == before {
        return Ok(false);
    }
    save_items(state, principal, contest_id, DetailKind::Tasks, &tasks).await?;
    sync_progress(state, principal, contest_id, &tasks).await?;
    Ok(true)
}

/// Re-derive the parent contest's progress from its checklist. An empty
/// checklist leaves the stored progress untouched.
async fn sync_progress(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    tasks: &[Task],
) -> AppResult<()> {
    let contest = contests::get(state, principal, contest_id).await?;
    let derived = progress_from_tasks(tasks, contest.progress);
    if derived != contest.progress {
        contests::set_progress(state, principal, contest_id, derived).await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Team members
// ---------------------------------------------------------------------------

/// DTO for adding a team member.
#[derive(Debug, Deserialize)]
pub struct AddTeamMember {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// DTO for patching a team member.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn add_team_member(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    input: AddTeamMember,
) -> AppResult<TeamMember> {
    contests::get(state, principal, contest_id).await?;

    let mut members: Vec<TeamMember> =
        load_items(state, principal, contest_id, DetailKind::TeamMembers).await?;
    let member = TeamMember {
        id: next_id(&members, |m| m.id),
        name: input.name,
        role: input.role.unwrap_or_default(),
        email: input.email,
        phone: input.phone,
    };
    members.push(member.clone());
    save_items(state, principal, contest_id, DetailKind::TeamMembers, &members).await?;
    sync_team_count(state, principal, contest_id, members.len()).await?;
    Ok(member)
}

pub async fn update_team_member(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    member_id: DbId,
    input: UpdateTeamMember,
) -> AppResult<TeamMember> {
    let mut members: Vec<TeamMember> =
        load_items(state, principal, contest_id, DetailKind::TeamMembers).await?;
    let member = {
        let member = members.iter_mut().find(|m| m.id == member_id).ok_or(
            AppError::Core(CoreError::NotFound {
                entity: "TeamMember",
                id: member_id,
            }),
        )?;
        if let Some(name) = input.name {
            member.name = name;
        }
        if let Some(role) = input.role {
            member.role = role;
        }
        if input.email.is_some() {
            member.email = input.email;
        }
        if input.phone.is_some() {
            member.phone = input.phone;
        }
        member.clone()
    };
    save_items(state, principal, contest_id, DetailKind::TeamMembers, &members).await?;
    Ok(member)
}

pub async fn remove_team_member(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    member_id: DbId,
) -> AppResult<bool> {
    let mut members: Vec<TeamMember> =
        load_items(state, principal, contest_id, DetailKind::TeamMembers).await?;
    let before = members.len();
    members.retain(|m| m.id != member_id);
    if members.len() == before {
        return Ok(false);
    }
    save_items(state, principal, contest_id, DetailKind::TeamMembers, &members).await?;
    sync_team_count(state, principal, contest_id, members.len()).await?;
    Ok(true)
}

async fn sync_team_count(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    count: usize,
) -> AppResult<()> {
    contests::set_team_members_count(state, principal, contest_id, count as i32).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

/// DTO for adding a schedule item.
#[derive(Debug, Deserialize)]
pub struct AddScheduleItem {
    pub title: String,
    pub date: Timestamp,
    #[serde(default)]
    pub description: Option<String>,
}

/// DTO for patching a schedule item.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateScheduleItem {
    pub title: Option<String>,
    pub date: Option<Timestamp>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

pub async fn add_schedule_item(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    input: AddScheduleItem,
) -> AppResult<ScheduleItem> {
    contests::get(state, principal, contest_id).await?;

    let mut items: Vec<ScheduleItem> =
        load_items(state, principal, contest_id, DetailKind::Schedules).await?;
    let item = ScheduleItem {
        id: next_id(&items, |s| s.id),
        title: input.title,
        date: input.date,
        description: input.description,
        completed: false,
    };
    items.push(item.clone());
    save_items(state, principal, contest_id, DetailKind::Schedules, &items).await?;
    Ok(item)
}

pub async fn update_schedule_item(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    item_id: DbId,
    input: UpdateScheduleItem,
) -> AppResult<ScheduleItem> {
    let mut items: Vec<ScheduleItem> =
        load_items(state, principal, contest_id, DetailKind::Schedules).await?;
    let item = {
        let item = items.iter_mut().find(|s| s.id == item_id).ok_or(
            AppError::Core(CoreError::NotFound {
                entity: "ScheduleItem",
                id: item_id,
            }),
        )?;
        if let Some(title) = input.title {
            item.title = title;
        }
        if let Some(date) = input.date {
            item.date = date;
        }
        if input.description.is_some() {
            item.description = input.description;
        }
        if let Some(completed) = input.completed {
            item.completed = completed;
        }
        item.clone()
    };
    save_items(state, principal, contest_id, DetailKind::Schedules, &items).await?;
    Ok(item)
}

pub async fn remove_schedule_item(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    item_id: DbId,
) -> AppResult<bool> {
    let mut items: Vec<ScheduleItem> =
        load_items(state, principal, contest_id, DetailKind::Schedules).await?;
    let before = items.len();
    items.retain(|s| s.id != item_id);
    if items.len() == before {
        return Ok(false);
    }
    save_items(state, principal, contest_id, DetailKind::Schedules, &items).await?;
    Ok(true)
}
