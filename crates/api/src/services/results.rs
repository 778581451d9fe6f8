//! Contest results: at most one per contest, readable only by the
//! contest's owner.

use chrono::Utc;

use palmares_core::error::CoreError;
use palmares_core::types::DbId;
use palmares_db::models::result::{ContestResult, CreateResult, UpdateResult};
use palmares_db::repositories::ResultRepo;
use palmares_store::local::next_id;

use crate::error::{AppError, AppResult};
use crate::services::{contests, Principal};
use crate::state::AppState;

/// Local collection key for results (one collection across contests,
/// looked up by `contest_id`).
const LOCAL_KEY: &str = "results";

/// Verify the caller owns the parent contest. Result rows can carry prize
/// and feedback details, so unlike the contest record itself they are not
/// publicly readable.
async fn check_owner(state: &AppState, principal: Principal, contest_id: DbId) -> AppResult<()> {
    let contest = contests::get(state, principal, contest_id).await?;
    if contest.user_id != principal {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the contest owner can access its result".to_string(),
        )));
    }
    Ok(())
}

/// Fetch the result recorded for a contest, if any.
pub async fn get(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
) -> AppResult<Option<ContestResult>> {
    check_owner(state, principal, contest_id).await?;
    match principal {
        Some(_) => Ok(ResultRepo::get_for_contest(&state.pool, contest_id).await?),
        None => Ok(state
            .local
            .collection::<ContestResult>(LOCAL_KEY)?
            .load()
            .into_iter()
            .find(|r| r.contest_id == contest_id)),
    }
}

/// Record the result for a contest. Each contest takes exactly one.
pub async fn add(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    input: &CreateResult,
) -> AppResult<ContestResult> {
    check_owner(state, principal, contest_id).await?;
    match principal {
        Some(user_id) => {
            // A second insert trips the per-contest unique constraint,
            // which surfaces as a conflict.
            Ok(ResultRepo::create(&state.pool, user_id, contest_id, input).await?)
        }
        None => {
            let collection = state.local.collection::<ContestResult>(LOCAL_KEY)?;
            collection.modify(|results| {
                if results.iter().any(|r| r.contest_id == contest_id) {
                    return Err(AppError::Core(CoreError::Conflict(
                        "This contest already has a result".to_string(),
                    )));
                }
                let now = Utc::now();
                let result = ContestResult {
                    id: next_id(results, |r| r.id),
                    contest_id,
                    user_id: None,
                    description: input.description.clone(),
                    status: input.status.clone(),
                    prize_amount: input.prize_amount.clone(),
                    feedback: input.feedback.clone(),
                    announcement_date: input.announcement_date,
                    file_ids: input.file_ids.clone(),
                    created_at: now,
                    updated_at: now,
                };
                results.insert(0, result.clone());
                Ok(result)
            })?
        }
    }
}

/// Apply a partial update to a contest's result.
pub async fn update(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    input: &UpdateResult,
) -> AppResult<ContestResult> {
    check_owner(state, principal, contest_id).await?;
    match principal {
        Some(user_id) => ResultRepo::update(&state.pool, user_id, contest_id, input)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "ContestResult",
                id: contest_id,
            })),
        None => {
            let collection = state.local.collection::<ContestResult>(LOCAL_KEY)?;
            collection.modify(|results| {
                let Some(result) = results.iter_mut().find(|r| r.contest_id == contest_id) else {
                    return Err(AppError::Core(CoreError::NotFound {
                        entity: "ContestResult",
                        id: contest_id,
                    }));
                };
                if input.description.is_some() {
                    result.description = input.description.clone();
                }
                if let Some(status) = &input.status {
                    result.status = status.clone();
                }
                if input.prize_amount.is_some() {
                    result.prize_amount = input.prize_amount.clone();
                }
                if input.feedback.is_some() {
                    result.feedback = input.feedback.clone();
                }
                if let Some(date) = input.announcement_date {
                    result.announcement_date = date;
                }
                if input.file_ids.is_some() {
                    result.file_ids = input.file_ids.clone();
                }
                result.updated_at = Utc::now();
                Ok(result.clone())
            })?
        }
    }
}

/// Delete a contest's result. Returns `true` if one existed.
pub async fn delete(state: &AppState, principal: Principal, contest_id: DbId) -> AppResult<bool> {
    check_owner(state, principal, contest_id).await?;
    match principal {
        Some(user_id) => Ok(ResultRepo::delete(&state.pool, user_id, contest_id).await?),
        None => {
            let collection = state.local.collection::<ContestResult>(LOCAL_KEY)?;
            let deleted = collection.modify(|results| {
                let before = results.len();
                results.retain(|r| r.contest_id != contest_id);
                results.len() < before
            })?;
            Ok(deleted)
        }
    }
}
