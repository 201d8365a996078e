//! Storage seams for the collection store.
//!
//! [`KeyValueStorage`] is the raw persistent key-value boundary (SQLite, a
//! directory of JSON files, or memory). [`CollectionRepository`] is what the
//! store actually depends on: load and save the whole collection as one unit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::models::TrackedPlant;

/// Key the collection is stored under.
pub const COLLECTION_KEY: &str = "plant-storage";

/// A persistent string-to-string map.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Loads and saves the whole collection.
pub trait CollectionRepository: Send + Sync {
    /// The previously saved collection, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<Vec<TrackedPlant>>, StorageError>;

    /// Replace the saved collection with `plants`.
    fn save(&self, plants: &[TrackedPlant]) -> Result<(), StorageError>;
}

/// Stores the collection as a single JSON array under one key.
#[derive(Debug, Clone)]
pub struct KeyValueRepository<S> {
    storage: S,
}

impl<S: KeyValueStorage> KeyValueRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: KeyValueStorage> CollectionRepository for KeyValueRepository<S> {
    fn load(&self) -> Result<Option<Vec<TrackedPlant>>, StorageError> {
        match self.storage.get(COLLECTION_KEY)? {
            Some(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, plants: &[TrackedPlant]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(plants)?;
        self.storage.set(COLLECTION_KEY, &blob)
    }
}

/// In-process storage, for tests and ephemeral runs.
///
/// Clones share the same map. [`MemoryStorage::set_failing`] makes every call
/// return [`StorageError::Unavailable`], to exercise best-effort persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory storage set to fail".into()));
        }
        Ok(())
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".into()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
