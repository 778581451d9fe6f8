//! Contest CRUD over both stores, plus the aggregation-cache and
//! side-effect wiring.

use chrono::Utc;

use palmares_core::details::DetailKind;
use palmares_core::error::CoreError;
use palmares_core::lifecycle::progress_from_tasks;
use palmares_core::status::ContestStatus;
use palmares_core::types::DbId;
use palmares_db::models::contest::{Contest, CreateContest, UpdateContest};
use palmares_db::repositories::ContestRepo;
use palmares_store::local::next_id;

use crate::error::{AppError, AppResult};
use crate::services::{activity, details, Principal};
use crate::state::AppState;

/// Local collection key for contests.
const LOCAL_KEY: &str = "contests";

/// Which list a caller is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Every contest, regardless of owner. Read-only public browsing,
    /// always served from the remote database.
    All,
    /// The caller's own contests (or the device-local set when anonymous).
    Mine,
}

/// List contests for a scope, serving from the aggregation cache when it
/// is primed and priming it on first use.
pub async fn list(state: &AppState, principal: Principal, scope: ListScope) -> AppResult<Vec<Contest>> {
    match scope {
        ListScope::All => {
            if let Some(cached) = state.contest_cache.all().await {
                return Ok(cached);
            }
            let contests = ContestRepo::list_all(&state.pool).await?;
            state.contest_cache.prime_all(contests.clone()).await;
            Ok(contests)
        }
        ListScope::Mine => {
            if let Some(cached) = state.contest_cache.mine(principal).await {
                return Ok(cached);
            }
            let contests = match principal {
                Some(user_id) => ContestRepo::list_for_user(&state.pool, user_id).await?,
                None => state.local.collection::<Contest>(LOCAL_KEY)?.load(),
            };
            state
                .contest_cache
                .prime_mine(principal, contests.clone())
                .await;
            Ok(contests)
        }
    }
}

/// Fetch a single contest by id.
pub async fn get(state: &AppState, principal: Principal, id: DbId) -> AppResult<Contest> {
    let found = match principal {
        Some(_) => ContestRepo::find_by_id(&state.pool, id).await?,
        None => state
            .local
            .collection::<Contest>(LOCAL_KEY)?
            .load()
            .into_iter()
            .find(|c| c.id == id),
    };
    found.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Contest",
        id,
    }))
}

/// Create a contest. On the authenticated path this also fires the
/// best-effort activity-log and statistics side effects.
pub async fn add(state: &AppState, principal: Principal, input: &CreateContest) -> AppResult<Contest> {
    if let Some(status) = input.status.as_deref() {
        ContestStatus::parse(status)?;
    }

    let contest = match principal {
        Some(user_id) => {
            let contest = ContestRepo::create(&state.pool, user_id, input).await?;
            activity::record_contest_created(state, user_id, contest.id, &contest.title);
            contest
        }
        None => {
            let collection = state.local.collection::<Contest>(LOCAL_KEY)?;
            collection.modify(|contests| {
                let now = Utc::now();
                let contest = Contest {
                    id: next_id(contests, |c| c.id),
                    user_id: None,
                    title: input.title.clone(),
                    organization: input.organization.clone().unwrap_or_default(),
                    category: input.category.clone().unwrap_or_default(),
                    description: input.description.clone().unwrap_or_default(),
                    theme: input.theme.clone().unwrap_or_default(),
                    submission_format: input.submission_format.clone().unwrap_or_default(),
                    schedule_note: input.schedule_note.clone().unwrap_or_default(),
                    prize: input.prize.clone().unwrap_or_default(),
                    precautions: input.precautions.clone().unwrap_or_default(),
                    result_announcement: input.result_announcement.clone().unwrap_or_default(),
                    url: input.url.clone().unwrap_or_default(),
                    status: input
                        .status
                        .clone()
                        .unwrap_or_else(|| ContestStatus::Preparing.as_str().to_string()),
                    progress: input.progress.unwrap_or(0),
                    deadline: input.deadline,
                    team_members_count: 0,
                    created_at: now,
                    updated_at: now,
                };
                contests.insert(0, contest.clone());
                contest
            })?
        }
    };

    state.contest_cache.apply_add(principal, &contest).await;
    Ok(contest)
}

/// Apply a partial update.
///
/// Progress reconciliation: while the contest has a task checklist, its
/// progress is task-derived, and a direct `progress` value in the patch is
/// overridden by the checklist. Free-form progress applies only until the
/// first task is added.
pub async fn update(
    state: &AppState,
    principal: Principal,
    id: DbId,
    input: &UpdateContest,
) -> AppResult<Contest> {
    if let Some(status) = input.status.as_deref() {
        ContestStatus::parse(status)?;
    }

    let mut contest = apply_update(state, principal, id, input).await?;

    if input.progress.is_some() {
        let tasks = details::load_tasks(state, principal, id).await?;
        if !tasks.is_empty() {
            let derived = progress_from_tasks(&tasks, contest.progress);
            if derived != contest.progress {
                contest = set_progress(state, principal, id, derived).await?;
            }
        }
    }

    state.contest_cache.apply_update(principal, &contest).await;
    Ok(contest)
}

async fn apply_update(
    state: &AppState,
    principal: Principal,
    id: DbId,
    input: &UpdateContest,
) -> AppResult<Contest> {
    match principal {
        Some(user_id) => ContestRepo::update(&state.pool, id, user_id, input)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Contest",
                id,
            })),
        None => {
            let collection = state.local.collection::<Contest>(LOCAL_KEY)?;
            collection.modify(|contests| {
                let Some(contest) = contests.iter_mut().find(|c| c.id == id) else {
                    return Err(AppError::Core(CoreError::NotFound {
                        entity: "Contest",
                        id,
                    }));
                };
                apply_patch(contest, input);
                Ok(contest.clone())
            })?
        }
    }
}

fn apply_patch(contest: &mut Contest, input: &UpdateContest) {
    let fields = [
        (&input.title, &mut contest.title),
        (&input.organization, &mut contest.organization),
        (&input.category, &mut contest.category),
        (&input.description, &mut contest.description),
        (&input.theme, &mut contest.theme),
        (&input.submission_format, &mut contest.submission_format),
        (&input.schedule_note, &mut contest.schedule_note),
        (&input.prize, &mut contest.prize),
        (&input.precautions, &mut contest.precautions),
        (&input.result_announcement, &mut contest.result_announcement),
        (&input.url, &mut contest.url),
        (&input.status, &mut contest.status),
    ];
    for (patch, field) in fields {
        if let Some(value) = patch {
            *field = value.clone();
        }
    }
    if let Some(progress) = input.progress {
        contest.progress = progress;
    }
    if let Some(deadline) = input.deadline {
        contest.deadline = Some(deadline);
    }
    contest.updated_at = Utc::now();
}

/// Overwrite the stored progress with a task-derived value. Used by the
/// details service after checklist mutations.
pub async fn set_progress(
    state: &AppState,
    principal: Principal,
    id: DbId,
    progress: i32,
) -> AppResult<Contest> {
    let contest = match principal {
        Some(user_id) => ContestRepo::set_progress(&state.pool, id, user_id, progress)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Contest",
                id,
            }))?,
        None => {
            let collection = state.local.collection::<Contest>(LOCAL_KEY)?;
            collection.modify(|contests| {
                let Some(contest) = contests.iter_mut().find(|c| c.id == id) else {
                    return Err(AppError::Core(CoreError::NotFound {
                        entity: "Contest",
                        id,
                    }));
                };
                contest.progress = progress;
                contest.updated_at = Utc::now();
                Ok(contest.clone())
            })??
        }
    };
    state.contest_cache.apply_update(principal, &contest).await;
    Ok(contest)
}

/// Overwrite the cached team-member count. Used by the details service.
pub async fn set_team_members_count(
    state: &AppState,
    principal: Principal,
    id: DbId,
    count: i32,
) -> AppResult<Contest> {
    let contest = match principal {
        Some(user_id) => ContestRepo::set_team_members_count(&state.pool, id, user_id, count)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Contest",
                id,
            }))?,
        None => {
            let collection = state.local.collection::<Contest>(LOCAL_KEY)?;
            collection.modify(|contests| {
                let Some(contest) = contests.iter_mut().find(|c| c.id == id) else {
                    return Err(AppError::Core(CoreError::NotFound {
                        entity: "Contest",
                        id,
                    }));
                };
                contest.team_members_count = count;
                contest.updated_at = Utc::now();
                Ok(contest.clone())
            })??
        }
    };
    state.contest_cache.apply_update(principal, &contest).await;
    Ok(contest)
}

/// Delete a contest. Child collections cascade remotely; locally the
/// per-contest child collections are cleared alongside.
pub async fn delete(state: &AppState, principal: Principal, id: DbId) -> AppResult<bool> {
    let deleted = match principal {
        Some(user_id) => ContestRepo::delete(&state.pool, id, user_id).await?,
        None => {
            let collection = state.local.collection::<Contest>(LOCAL_KEY)?;
            let deleted = collection.modify(|contests| {
                let before = contests.len();
                contests.retain(|c| c.id != id);
                contests.len() < before
            })?;
            if deleted {
                for kind in [
                    DetailKind::Tasks,
                    DetailKind::TeamMembers,
                    DetailKind::Schedules,
                ] {
                    details::clear_local(state, id, kind)?;
                }
            }
            deleted
        }
    };

    if deleted {
        state.contest_cache.apply_delete(principal, id).await;
    }
    Ok(deleted)
}
