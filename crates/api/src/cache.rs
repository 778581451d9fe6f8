//! In-memory aggregation cache for contest lists.
//!
//! Two collections are kept warm: the public "all contests" list and a
//! per-principal "mine" list (the anonymous local-store user caches under
//! `None`). Each list is primed at most once from storage; after that,
//! every successful add/update/delete is applied optimistically to the
//! cached copies: the mutation response is trusted as the new source of
//! truth for that record, and no re-fetch is triggered.
//!
//! Only raw [`Contest`] rows are cached. Derived fields (days left,
//! urgency) are recomputed on every read at the view layer.

use std::collections::HashMap;

use tokio::sync::RwLock;

use palmares_core::types::DbId;
use palmares_db::models::contest::Contest;

/// Cache key for the "mine" map: the principal, or `None` for the
/// anonymous local-store user.
type Principal = Option<DbId>;

/// Contest list cache. Lives in `AppState` behind an `Arc`.
#[derive(Default)]
pub struct ContestCache {
    all: RwLock<Option<Vec<Contest>>>,
    mine: RwLock<HashMap<Principal, Vec<Contest>>>,
}

impl ContestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached "all" list, if it has been primed.
    pub async fn all(&self) -> Option<Vec<Contest>> {
        self.all.read().await.clone()
    }

    /// Prime the "all" list. A second concurrent prime is ignored so a
    /// pair of racing first reads cannot clobber applied mutations.
    pub async fn prime_all(&self, contests: Vec<Contest>) {
        let mut slot = self.all.write().await;
        if slot.is_none() {
            *slot = Some(contests);
        }
    }

    /// The cached "mine" list for a principal, if primed.
    pub async fn mine(&self, principal: Principal) -> Option<Vec<Contest>> {
        self.mine.read().await.get(&principal).cloned()
    }

    /// Prime the "mine" list for a principal.
    pub async fn prime_mine(&self, principal: Principal, contests: Vec<Contest>) {
        self.mine.write().await.entry(principal).or_insert(contests);
    }

    /// Apply a successful add: prepend to both primed lists (newest first).
    pub async fn apply_add(&self, principal: Principal, contest: &Contest) {
        if let Some(all) = self.all.write().await.as_mut() {
            all.insert(0, contest.clone());
        }
        if let Some(mine) = self.mine.write().await.get_mut(&principal) {
            mine.insert(0, contest.clone());
        }
    }

    /// Apply a successful update: replace the record in place wherever it
    /// is cached.
    pub async fn apply_update(&self, principal: Principal, contest: &Contest) {
        if let Some(all) = self.all.write().await.as_mut() {
            if let Some(slot) = all.iter_mut().find(|c| c.id == contest.id) {
                *slot = contest.clone();
            }
        }
        if let Some(mine) = self.mine.write().await.get_mut(&principal) {
            if let Some(slot) = mine.iter_mut().find(|c| c.id == contest.id) {
                *slot = contest.clone();
            }
        }
    }

    /// Apply a successful delete: drop the record wherever it is cached.
    pub async fn apply_delete(&self, principal: Principal, id: DbId) {
        if let Some(all) = self.all.write().await.as_mut() {
            all.retain(|c| c.id != id);
        }
        if let Some(mine) = self.mine.write().await.get_mut(&principal) {
            mine.retain(|c| c.id != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn contest(id: DbId, title: &str) -> Contest {
        let now = Utc::now();
        Contest {
            id,
            user_id: Some(7),
            title: title.to_string(),
            organization: String::new(),
            category: String::new(),
            description: String::new(),
            theme: String::new(),
            submission_format: String::new(),
            schedule_note: String::new(),
            prize: String::new(),
            precautions: String::new(),
            result_announcement: String::new(),
            url: String::new(),
            status: "preparing".into(),
            progress: 0,
            deadline: None,
            team_members_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn unprimed_lists_read_as_none() {
        let cache = ContestCache::new();
        assert!(cache.all().await.is_none());
        assert!(cache.mine(Some(7)).await.is_none());
    }

    #[tokio::test]
    async fn prime_all_is_first_writer_wins() {
        let cache = ContestCache::new();
        cache.prime_all(vec![contest(1, "a")]).await;
        cache.prime_all(vec![contest(2, "b")]).await;

        let all = cache.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 1);
    }

    #[tokio::test]
    async fn add_prepends_to_both_primed_lists() {
        let cache = ContestCache::new();
        cache.prime_all(vec![contest(1, "old")]).await;
        cache.prime_mine(Some(7), vec![contest(1, "old")]).await;

        cache.apply_add(Some(7), &contest(2, "new")).await;

        assert_eq!(cache.all().await.unwrap()[0].id, 2);
        assert_eq!(cache.mine(Some(7)).await.unwrap()[0].id, 2);
        // An unprimed principal stays unprimed rather than getting a
        // partial list.
        assert!(cache.mine(None).await.is_none());
    }

    #[tokio::test]
    async fn update_replaces_in_place_without_reordering() {
        let cache = ContestCache::new();
        cache
            .prime_all(vec![contest(2, "b"), contest(1, "a")])
            .await;

        let mut changed = contest(1, "a2");
        changed.progress = 50;
        cache.apply_update(Some(7), &changed).await;

        let all = cache.all().await.unwrap();
        assert_eq!(all[1].title, "a2");
        assert_eq!(all[1].progress, 50);
        assert_eq!(all[0].id, 2);
    }

    #[tokio::test]
    async fn delete_removes_from_both_lists() {
        let cache = ContestCache::new();
        cache.prime_all(vec![contest(1, "a"), contest(2, "b")]).await;
        cache.prime_mine(None, vec![contest(1, "a")]).await;

        cache.apply_delete(None, 1).await;

        assert_eq!(cache.all().await.unwrap().len(), 1);
        assert!(cache.mine(None).await.unwrap().is_empty());
    }
}
