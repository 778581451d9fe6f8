//! Handlers for the AI collaborator endpoints.
//!
//! Every endpoint is a single upstream attempt. A missing API key maps to
//! a distinct error from a failed call, so clients can route the user to
//! settings instead of showing a generic failure.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use palmares_ai::ideas::{generate_ideas, IdeaContext};
use palmares_core::extraction::ExtractedContest;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/ai/ideas
///
/// Generate submission ideas from contest context. All-or-nothing: either
/// the full idea list comes back or an error does.
pub async fn ideas(
    State(state): State<AppState>,
    Json(context): Json<IdeaContext>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    if context.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    let ideas = generate_ideas(&state.genai, &context).await?;
    Ok(Json(DataResponse { data: ideas }))
}

/// Body for `POST /ai/extract`: raw text, or a URL to scrape first.
#[derive(Debug, Deserialize)]
pub struct ExtractBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// POST /api/v1/ai/extract
///
/// Extract the full contest field set from pasted text or a page URL.
/// Extraction never partially fails: malformed replies degrade to
/// field-by-field defaults (blank strings, deadline 30 days out).
pub async fn extract(
    State(state): State<AppState>,
    Json(body): Json<ExtractBody>,
) -> AppResult<Json<DataResponse<ExtractedContest>>> {
    let text = match (body.text, body.url) {
        (Some(text), _) if !text.trim().is_empty() => text,
        (_, Some(url)) if !url.trim().is_empty() => state.scraper.scrape(&url).await?,
        _ => {
            return Err(AppError::BadRequest(
                "Provide either 'text' or 'url'".to_string(),
            ))
        }
    };
    let extracted = state.genai.extract_contest_fields(&text, Utc::now()).await?;
    Ok(Json(DataResponse { data: extracted }))
}

/// Body for `POST /ai/review`.
#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub text: String,
    /// Label for the kind of document under review, e.g. `proposal`.
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
}

fn default_doc_type() -> String {
    "document".to_string()
}

/// POST /api/v1/ai/review
pub async fn review(
    State(state): State<AppState>,
    Json(body): Json<ReviewBody>,
) -> AppResult<Json<serde_json::Value>> {
    if body.text.trim().is_empty() {
        return Err(AppError::BadRequest("text must not be empty".into()));
    }
    let review = state.genai.review_document(&body.text, &body.doc_type).await?;
    Ok(Json(json!({ "data": { "review": review } })))
}

/// Body for `POST /ai/scrape`.
#[derive(Debug, Deserialize)]
pub struct ScrapeBody {
    pub url: String,
}

/// POST /api/v1/ai/scrape
pub async fn scrape(
    State(state): State<AppState>,
    Json(body): Json<ScrapeBody>,
) -> AppResult<Json<serde_json::Value>> {
    if body.url.trim().is_empty() {
        return Err(AppError::BadRequest("url must not be empty".into()));
    }
    let markdown = state.scraper.scrape(&body.url).await?;
    Ok(Json(json!({ "data": { "markdown": markdown } })))
}
