//! Route definitions for the `/contests` resource and its nested
//! collections.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{contests, details, results};
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// GET    /contests                                -> list
/// POST   /contests                                -> create
/// GET    /contests/{id}                           -> get
/// PUT    /contests/{id}                           -> update
/// DELETE /contests/{id}                           -> delete
///
/// GET    /contests/{id}/tasks                     -> list_tasks
/// PUT    /contests/{id}/tasks                     -> replace_tasks
/// POST   /contests/{id}/tasks                     -> add_task
/// PUT    /contests/{id}/tasks/{task_id}           -> update_task
/// DELETE /contests/{id}/tasks/{task_id}           -> remove_task
/// (same trio for /team-members and /schedules)
///
/// GET    /contests/{id}/result                    -> get result
/// POST   /contests/{id}/result                    -> create result
/// PUT    /contests/{id}/result                    -> update result
/// DELETE /contests/{id}/result                    -> delete result
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contests", get(contests::list).post(contests::create))
        .route(
            "/contests/{id}",
            get(contests::get)
                .put(contests::update)
                .delete(contests::delete),
        )
        // Tasks
        .route(
            "/contests/{id}/tasks",
            get(details::list_tasks)
                .put(details::replace_tasks)
                .post(details::add_task),
        )
        .route(
            "/contests/{id}/tasks/{task_id}",
            put(details::update_task).delete(details::remove_task),
        )
        // Team members
        .route(
            "/contests/{id}/team-members",
            get(details::list_team_members)
                .put(details::replace_team_members)
                .post(details::add_team_member),
        )
        .route(
            "/contests/{id}/team-members/{member_id}",
            put(details::update_team_member).delete(details::remove_team_member),
        )
        // Schedules
        .route(
            "/contests/{id}/schedules",
            get(details::list_schedules)
                .put(details::replace_schedules)
                .post(details::add_schedule_item),
        )
        .route(
            "/contests/{id}/schedules/{item_id}",
            put(details::update_schedule_item).delete(details::remove_schedule_item),
        )
        // Result (one per contest)
        .route(
            "/contests/{id}/result",
            get(results::get)
                .post(results::create)
                .put(results::update)
                .delete(results::delete),
        )
}
