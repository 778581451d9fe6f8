//! Route definitions for generation prompts.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /contests/{id}/prompts   -> list
/// POST   /contests/{id}/prompts   -> create
/// PUT    /prompts/{id}            -> update
/// DELETE /prompts/{id}            -> delete
/// POST   /prompts/{id}/link-file  -> link_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/contests/{id}/prompts",
            get(prompts::list).post(prompts::create),
        )
        .route(
            "/prompts/{id}",
            put(prompts::update).delete(prompts::delete),
        )
        .route("/prompts/{id}/link-file", post(prompts::link_file))
}
