pub mod ai;
pub mod contests;
pub mod files;
pub mod health;
pub mod notifications;
pub mod prompts;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contests                                list (?scope=mine|all), create
/// /contests/{id}                           get, update, delete
/// /contests/{id}/tasks                     read, replace, add item
/// /contests/{id}/tasks/{task_id}           update, remove item
/// /contests/{id}/team-members              read, replace, add item
/// /contests/{id}/team-members/{member_id}  update, remove item
/// /contests/{id}/schedules                 read, replace, add item
/// /contests/{id}/schedules/{item_id}       update, remove item
/// /contests/{id}/files                     list, upload (multipart batch)
/// /contests/{id}/prompts                   list, create
/// /contests/{id}/result                    get, create, update, delete
///
/// /files/{id}                              delete
///
/// /prompts/{id}                            update, delete
/// /prompts/{id}/link-file                  link produced file (POST)
///
/// /notifications                           list (?unread_only), create
/// /notifications/read-all                  mark all read (POST)
/// /notifications/unread-count              unread count (GET)
/// /notifications/{id}/read                 mark read (POST, idempotent)
///
/// /ai/ideas                                generate submission ideas (POST)
/// /ai/extract                              extract contest fields (POST)
/// /ai/review                               review a document draft (POST)
/// /ai/scrape                               scrape a page to markdown (POST)
///
/// /users/me/statistics                     counters (auth required)
/// /users/me/activities                     activity log (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contests::router())
        .merge(files::router())
        .merge(prompts::router())
        .nest("/notifications", notifications::router())
        .nest("/ai", ai::router())
        .nest("/users", users::router())
}
