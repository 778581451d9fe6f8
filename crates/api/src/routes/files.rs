//! Route definitions for file uploads and metadata.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /contests/{id}/files  -> list
/// POST   /contests/{id}/files  -> upload (multipart batch)
/// DELETE /files/{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/contests/{id}/files",
            get(files::list).post(files::upload),
        )
        .route("/files/{id}", delete(files::delete))
}
