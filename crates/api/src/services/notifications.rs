//! Notifications, newest first, with idempotent read-marking.

use chrono::Utc;

use palmares_core::error::CoreError;
use palmares_core::status::NotificationKind;
use palmares_core::types::DbId;
use palmares_db::models::notification::{CreateNotification, Notification};
use palmares_db::repositories::NotificationRepo;
use palmares_store::local::next_id;

use crate::error::{AppError, AppResult};
use crate::services::Principal;
use crate::state::AppState;

/// Local collection key for notifications.
const LOCAL_KEY: &str = "notifications";

/// List the caller's notifications, newest first. `unread_only` narrows
/// to the ones not yet marked read.
pub async fn list(
    state: &AppState,
    principal: Principal,
    unread_only: bool,
) -> AppResult<Vec<Notification>> {
    match principal {
        Some(user_id) => {
            Ok(NotificationRepo::list_for_user(&state.pool, user_id, unread_only).await?)
        }
        None => {
            let mut items = state.local.collection::<Notification>(LOCAL_KEY)?.load();
            if unread_only {
                items.retain(|n| !n.is_read);
            }
            Ok(items)
        }
    }
}

/// Create a notification for the caller.
pub async fn add(
    state: &AppState,
    principal: Principal,
    input: &CreateNotification,
) -> AppResult<Notification> {
    if let Some(kind) = input.kind.as_deref() {
        NotificationKind::parse(kind)?;
    }

    match principal {
        Some(user_id) => Ok(NotificationRepo::create(&state.pool, user_id, input).await?),
        None => {
            let collection = state.local.collection::<Notification>(LOCAL_KEY)?;
            let notification = collection.modify(|items| {
                let notification = Notification {
                    id: next_id(items, |n| n.id),
                    user_id: None,
                    contest_id: input.contest_id,
                    title: input.title.clone(),
                    message: input.message.clone(),
                    kind: input
                        .kind
                        .clone()
                        .unwrap_or_else(|| NotificationKind::Info.as_str().to_string()),
                    is_read: false,
                    created_at: Utc::now(),
                };
                items.insert(0, notification.clone());
                notification
            })?;
            Ok(notification)
        }
    }
}

/// Mark one notification read. Marking an already-read notification is a
/// success, not a conflict; only a missing notification is an error.
pub async fn mark_read(state: &AppState, principal: Principal, id: DbId) -> AppResult<()> {
    let found = match principal {
        Some(user_id) => NotificationRepo::mark_read(&state.pool, user_id, id).await?,
        None => {
            let collection = state.local.collection::<Notification>(LOCAL_KEY)?;
            collection.modify(|items| {
                match items.iter_mut().find(|n| n.id == id) {
                    Some(notification) => {
                        notification.is_read = true;
                        true
                    }
                    None => false,
                }
            })?
        }
    };
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(())
}

/// Mark every unread notification read, returning how many flipped.
pub async fn mark_all_read(state: &AppState, principal: Principal) -> AppResult<u64> {
    match principal {
        Some(user_id) => Ok(NotificationRepo::mark_all_read(&state.pool, user_id).await?),
        None => {
            let collection = state.local.collection::<Notification>(LOCAL_KEY)?;
            let flipped = collection.modify(|items| {
                let mut flipped = 0u64;
                for notification in items.iter_mut().filter(|n| !n.is_read) {
                    notification.is_read = true;
                    flipped += 1;
                }
                flipped
            })?;
            Ok(flipped)
        }
    }
}

/// Number of unread notifications for the caller.
pub async fn unread_count(state: &AppState, principal: Principal) -> AppResult<i64> {
    match principal {
        Some(user_id) => Ok(NotificationRepo::unread_count(&state.pool, user_id).await?),
        None => {
            let items = state.local.collection::<Notification>(LOCAL_KEY)?.load();
            Ok(items.iter().filter(|n| !n.is_read).count() as i64)
        }
    }
}
