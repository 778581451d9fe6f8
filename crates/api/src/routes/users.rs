//! Route definitions for the authenticated user's own aggregates.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /me/statistics  -> statistics
/// GET /me/activities  -> activities (?limit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me/statistics", get(users::statistics))
        .route("/me/activities", get(users::activities))
}
