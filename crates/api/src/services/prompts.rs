//! Generation prompts attached to a contest.

use chrono::Utc;

use palmares_core::error::CoreError;
use palmares_core::status::PromptType;
use palmares_core::types::DbId;
use palmares_db::models::contest::Contest;
use palmares_db::models::prompt::{CreatePrompt, Prompt, UpdatePrompt};
use palmares_db::repositories::{FileRepo, PromptRepo};
use palmares_store::local::next_id;

use crate::error::{AppError, AppResult};
use crate::services::{contests, files, scoped_key, Principal};
use crate::state::AppState;

/// List a contest's prompts, newest first.
pub async fn list(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
) -> AppResult<Vec<Prompt>> {
    match principal {
        Some(user_id) => Ok(PromptRepo::list_for_contest(&state.pool, user_id, contest_id).await?),
        None => Ok(state
            .local
            .collection::<Prompt>(&scoped_key("prompts", contest_id))?
            .load()),
    }
}

/// Record a prompt against a contest.
pub async fn add(
    state: &AppState,
    principal: Principal,
    contest_id: DbId,
    input: &CreatePrompt,
) -> AppResult<Prompt> {
    if let Some(prompt_type) = input.prompt_type.as_deref() {
        PromptType::parse(prompt_type)?;
    }
    contests::get(state, principal, contest_id).await?;

    match principal {
        Some(user_id) => Ok(PromptRepo::create(&state.pool, user_id, contest_id, input).await?),
        None => {
            let collection = state
                .local
                .collection::<Prompt>(&scoped_key("prompts", contest_id))?;
            let prompt = collection.modify(|prompts| {
                let prompt = Prompt {
                    id: next_id(prompts, |p| p.id),
                    contest_id,
                    user_id: None,
                    file_id: input.file_id,
                    prompt_type: input
                        .prompt_type
                        .clone()
                        .unwrap_or_else(|| PromptType::Other.as_str().to_string()),
                    prompt_text: input.prompt_text.clone(),
                    ai_model: input.ai_model.clone(),
                    generation_params: input.generation_params.clone(),
                    created_at: Utc::now(),
                };
                prompts.insert(0, prompt.clone());
                prompt
            })?;
            Ok(prompt)
        }
    }
}

/// Find a local-mode prompt by id, scanning the per-contest collections.
fn find_local(state: &AppState, prompt_id: DbId) -> AppResult<Option<Prompt>> {
    for contest in state.local.collection::<Contest>("contests")?.load() {
        let found = state
            .local
            .collection::<Prompt>(&scoped_key("prompts", contest.id))?
            .load()
            .into_iter()
            .find(|p| p.id == prompt_id);
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

fn not_found(prompt_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Prompt",
        id: prompt_id,
    })
}

/// Apply a partial update to a prompt.
pub async fn update(
    state: &AppState,
    principal: Principal,
    prompt_id: DbId,
    input: &UpdatePrompt,
) -> AppResult<Prompt> {
    if let Some(prompt_type) = input.prompt_type.as_deref() {
        PromptType::parse(prompt_type)?;
    }

    match principal {
        Some(user_id) => PromptRepo::update(&state.pool, user_id, prompt_id, input)
            .await?
            .ok_or_else(|| not_found(prompt_id)),
        None => {
            let existing = find_local(state, prompt_id)?.ok_or_else(|| not_found(prompt_id))?;
            let collection = state
                .local
                .collection::<Prompt>(&scoped_key("prompts", existing.contest_id))?;
            collection.modify(|prompts| {
                let Some(prompt) = prompts.iter_mut().find(|p| p.id == prompt_id) else {
                    return Err(not_found(prompt_id));
                };
                if let Some(prompt_type) = &input.prompt_type {
                    prompt.prompt_type = prompt_type.clone();
                }
                if let Some(prompt_text) = &input.prompt_text {
                    prompt.prompt_text = prompt_text.clone();
                }
                if input.ai_model.is_some() {
                    prompt.ai_model = input.ai_model.clone();
                }
                if input.generation_params.is_some() {
                    prompt.generation_params = input.generation_params.clone();
                }
                Ok(prompt.clone())
            })?
        }
    }
}

/// Point a prompt at the file it produced. The link is the `file_id`
/// foreign key alone; prompt text is never copied onto the file record.
pub async fn link_file(
    state: &AppState,
    principal: Principal,
    prompt_id: DbId,
    file_id: DbId,
) -> AppResult<Prompt> {
    match principal {
        Some(user_id) => {
            if FileRepo::find_by_id(&state.pool, user_id, file_id)
                .await?
                .is_none()
            {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "File",
                    id: file_id,
                }));
            }
            PromptRepo::link_file(&state.pool, user_id, prompt_id, file_id)
                .await?
                .ok_or_else(|| not_found(prompt_id))
        }
        None => {
            if files::find_local(state, file_id)?.is_none() {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "File",
                    id: file_id,
                }));
            }
            let existing = find_local(state, prompt_id)?.ok_or_else(|| not_found(prompt_id))?;
            let collection = state
                .local
                .collection::<Prompt>(&scoped_key("prompts", existing.contest_id))?;
            collection.modify(|prompts| {
                let Some(prompt) = prompts.iter_mut().find(|p| p.id == prompt_id) else {
                    return Err(not_found(prompt_id));
                };
                prompt.file_id = Some(file_id);
                Ok(prompt.clone())
            })?
        }
    }
}

/// Delete a prompt. Returns `true` if it existed.
pub async fn delete(state: &AppState, principal: Principal, prompt_id: DbId) -> AppResult<bool> {
    match principal {
        Some(user_id) => Ok(PromptRepo::delete(&state.pool, user_id, prompt_id).await?),
        None => {
            let Some(existing) = find_local(state, prompt_id)? else {
                return Ok(false);
            };
            let collection = state
                .local
                .collection::<Prompt>(&scoped_key("prompts", existing.contest_id))?;
            let deleted = collection.modify(|prompts| {
                let before = prompts.len();
                prompts.retain(|p| p.id != prompt_id);
                prompts.len() < before
            })?;
            Ok(deleted)
        }
    }
}
