//! The local JSON-collection store used when no principal is present.
//!
//! One collection per storage key, serialized whole on every write: there
//! is no append-only or partial-write protocol at this layer. Reads never
//! fail the caller path: a missing or corrupt file reads as an empty
//! collection (corruption is logged and the next write replaces it).
//!
//! All handles cloned from one store share a lock, and every load, save,
//! and read-modify-write cycle runs under it. Concurrent requests on the
//! same store therefore cannot interleave a `modify` and lose writes or
//! hand out duplicate ids.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use palmares_core::types::DbId;

/// Errors from local-store writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Local store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Local store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Root of the device-scoped store. One JSON file per collection key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    // One lock for the whole store root. Writes here are device-local and
    // rare, so serializing them is cheaper than a per-key lock map.
    lock: Arc<Mutex<()>>,
}

impl LocalStore {
    /// Open (and create if needed) a local store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            lock: Arc::new(Mutex::new(())),
        })
    }

    /// A typed handle to the collection stored under `key`.
    ///
    /// Keys follow the `<entity>` or `<entity>_<contestId>` convention,
    /// e.g. `contests`, `tasks_17`.
    pub fn collection<T>(&self, key: &str) -> Result<Collection<T>, StoreError> {
        if key.is_empty()
            || !key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(Collection {
            path: self.root.join(format!("{key}.json")),
            lock: Arc::clone(&self.lock),
            _marker: PhantomData,
        })
    }

    /// Filesystem root, exposed for diagnostics.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A typed JSON array on disk. Shares its store's lock, so operations on
/// any two handles from the same store are mutually exclusive.
pub struct Collection<T> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _marker: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    /// Read the whole collection. A missing file is an empty collection;
    /// a corrupt file is logged and also reads as empty.
    pub fn load(&self) -> Vec<T> {
        let _guard = self.guard();
        self.read()
    }

    /// Overwrite the collection with `items`.
    pub fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let _guard = self.guard();
        self.write(items)
    }

    /// Read-modify-write cycle: load the collection, apply `f`, write the
    /// whole collection back, and return what `f` returned. The store lock
    /// is held across the whole cycle, so concurrent `modify` calls never
    /// overwrite each other's changes.
    pub fn modify<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, StoreError> {
        let _guard = self.guard();
        let mut items = self.read();
        let out = f(&mut items);
        self.write(&items)?;
        Ok(out)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means another thread panicked mid-write;
        // the file itself is still the source of truth.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> Vec<T> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to read local collection");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Corrupt local collection, treating as empty");
                Vec::new()
            }
        }
    }

    fn write(&self, items: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_vec(items)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Insert at index 0 so `load()[0]` is always the most recent record.
    pub fn prepend(&self, item: T) -> Result<(), StoreError> {
        self.modify(|items| items.insert(0, item))
    }
}

/// Next locally assigned id for a collection: `max(id) + 1`, starting at 1.
pub fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> DbId) -> DbId {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rec {
        id: DbId,
        name: String,
    }

    fn rec(id: DbId, name: &str) -> Rec {
        Rec {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn missing_collection_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let coll: Collection<Rec> = store.collection("contests").unwrap();
        assert!(coll.load().is_empty());
    }

    #[test]
    fn prepend_keeps_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let coll = store.collection("contests").unwrap();

        coll.prepend(rec(1, "first")).unwrap();
        coll.prepend(rec(2, "second")).unwrap();

        let items = coll.load();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], rec(2, "second"));
        assert_eq!(items[1], rec(1, "first"));
    }

    #[test]
    fn save_overwrites_the_whole_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let coll = store.collection("tasks_5").unwrap();

        coll.save(&[rec(1, "a"), rec(2, "b")]).unwrap();
        coll.save(&[rec(3, "c")]).unwrap();

        assert_eq!(coll.load(), vec![rec(3, "c")]);
    }

    #[test]
    fn modify_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let coll = store.collection("team_members_9").unwrap();

        coll.save(&[rec(1, "a")]).unwrap();
        let removed = coll
            .modify(|items| {
                items.retain(|r| r.id != 1);
                items.push(rec(2, "b"));
                true
            })
            .unwrap();
        assert!(removed);
        assert_eq!(coll.load(), vec![rec(2, "b")]);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("contests.json"), b"{not json").unwrap();

        let coll: Collection<Rec> = store.collection("contests").unwrap();
        assert!(coll.load().is_empty());
    }

    #[test]
    fn keys_are_restricted_to_safe_characters() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.collection::<Rec>("../escape").is_err());
        assert!(store.collection::<Rec>("").is_err());
        assert!(store.collection::<Rec>("schedules_12").is_ok());
    }

    #[test]
    fn concurrent_modifies_lose_no_writes_and_no_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let threads = 16;
        let adds_per_thread = 25;
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let coll = store.collection::<Rec>("contests").unwrap();
                    for _ in 0..adds_per_thread {
                        coll.modify(|items| {
                            let id = next_id(items, |r| r.id);
                            items.insert(0, rec(id, "c"));
                        })
                        .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let items = store.collection::<Rec>("contests").unwrap().load();
        assert_eq!(items.len(), threads * adds_per_thread);

        let mut ids: Vec<_> = items.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), threads * adds_per_thread);
    }

    #[test]
    fn next_id_starts_at_one_and_increments_from_max() {
        let items: Vec<Rec> = Vec::new();
        assert_eq!(next_id(&items, |r| r.id), 1);

        let items = vec![rec(7, "a"), rec(3, "b")];
        assert_eq!(next_id(&items, |r| r.id), 8);
    }
}
