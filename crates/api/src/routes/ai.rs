//! Route definitions for the AI collaborator endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// Routes mounted at `/ai`.
///
/// ```text
/// POST /ideas    -> ideas
/// POST /extract  -> extract (text, or URL scraped first)
/// POST /review   -> review
/// POST /scrape   -> scrape
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ideas", post(ai::ideas))
        .route("/extract", post(ai::extract))
        .route("/review", post(ai::review))
        .route("/scrape", post(ai::scrape))
}
