//! The user's plant collection.
//!
//! [`CollectionStore`] owns the list of tracked plants and is the only thing
//! allowed to change it. Every mutation is applied in memory first and then
//! the entire collection is saved through the injected
//! [`CollectionRepository`].
//!
//! # Persistence is best-effort
//!
//! A failed save is logged and otherwise ignored: the in-memory collection
//! stays authoritative and the mutation still takes effect. Likewise a failed
//! or unreadable load at startup yields an empty collection. The consequence
//! is that persisted data can be silently lost (for example when the storage
//! device is full, or when a stored document no longer parses); callers that
//! cannot accept that should check the logs or use a storage backend that
//! cannot fail.

mod file;
mod repository;
mod schema;
mod sqlite;

pub use file::JsonFileStorage;
pub use repository::*;
pub use sqlite::SqliteStorage;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::models::*;

/// Platform data directory for the collection (e.g. `~/.local/share/plantcare`).
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "plantcare")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Owner of the tracked-plant collection.
///
/// Construction performs the initial load, so a store is always ready to
/// serve. Clones share the same collection; a single lock serializes
/// mutations together with their saves, so the storage always sees writes in
/// the order the operations were invoked.
///
/// Id-keyed operations act on the first plant with that id and do nothing
/// when there is none.
#[derive(Clone)]
pub struct CollectionStore {
    plants: Arc<Mutex<Vec<TrackedPlant>>>,
    repository: Arc<dyn CollectionRepository>,
}

impl CollectionStore {
    /// Restore the collection from `repository`, or start empty.
    pub fn open(repository: impl CollectionRepository + 'static) -> Self {
        Self::open_shared(Arc::new(repository))
    }

    pub fn open_shared(repository: Arc<dyn CollectionRepository>) -> Self {
        let plants = match repository.load() {
            Ok(Some(plants)) => {
                tracing::info!("Restored collection with {} plants", plants.len());
                plants
            }
            Ok(None) => {
                tracing::info!("No saved collection found, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to restore collection, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            plants: Arc::new(Mutex::new(plants)),
            repository,
        }
    }

    /// An empty store that keeps nothing beyond the process.
    pub fn in_memory() -> Self {
        Self::open(KeyValueRepository::new(MemoryStorage::new()))
    }

    /// The collection in insertion order.
    pub fn list(&self) -> Vec<TrackedPlant> {
        self.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<TrackedPlant> {
        self.lock().iter().find(|p| p.id() == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().iter().any(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Append a plant. The caller sets `added_date`.
    ///
    /// No uniqueness check is made here; see [`CollectionStore::adopt`].
    pub fn add(&self, plant: TrackedPlant) {
        self.mutate("add", |plants| plants.push(plant));
    }

    /// Start tracking the catalog species `species_id`, keeping the species id
    /// as the plant id.
    ///
    /// Refuses when a plant with that id is already tracked, since id-keyed
    /// operations could then only ever reach the first of the two.
    pub fn adopt(
        &self,
        catalog: &Catalog,
        species_id: &str,
        nickname: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<TrackedPlant, StoreError> {
        let species = catalog
            .find_species(species_id)
            .ok_or_else(|| StoreError::UnknownSpecies(species_id.to_string()))?;
        let mut plant = TrackedPlant::from_species(species.clone(), now);
        plant.nickname = nickname;

        let mut plants = self.lock();
        if plants.iter().any(|p| p.id() == species.id) {
            return Err(StoreError::AlreadyTracked(species.id.clone()));
        }
        plants.push(plant.clone());
        self.persist("adopt", &plants);
        Ok(plant)
    }

    pub fn remove(&self, id: &str) {
        self.mutate("remove", |plants| {
            if let Some(index) = plants.iter().position(|p| p.id() == id) {
                plants.remove(index);
            }
        });
    }

    /// Merge `update` into the plant, leaving unspecified fields untouched.
    pub fn update(&self, id: &str, update: PlantUpdate) {
        self.mutate("update", |plants| {
            if let Some(plant) = first_mut(plants, id) {
                plant.apply(update);
            }
        });
    }

    pub fn water(&self, id: &str) {
        self.water_at(id, Utc::now());
    }

    pub fn water_at(&self, id: &str, at: DateTime<Utc>) {
        self.mutate("water", |plants| {
            if let Some(plant) = first_mut(plants, id) {
                plant.last_watered = Some(at);
            }
        });
    }

    pub fn fertilize(&self, id: &str) {
        self.fertilize_at(id, Utc::now());
    }

    pub fn fertilize_at(&self, id: &str, at: DateTime<Utc>) {
        self.mutate("fertilize", |plants| {
            if let Some(plant) = first_mut(plants, id) {
                plant.last_fertilized = Some(at);
            }
        });
    }

    fn mutate(&self, op: &str, f: impl FnOnce(&mut Vec<TrackedPlant>)) {
        let mut plants = self.lock();
        f(&mut plants);
        self.persist(op, &plants);
    }

    fn persist(&self, op: &str, plants: &[TrackedPlant]) {
        match self.repository.save(plants) {
            Ok(()) => tracing::debug!("Saved collection after {} ({} plants)", op, plants.len()),
            Err(e) => tracing::warn!("Failed to save collection after {}: {}", op, e),
        }
    }

    // Mutations are single pushes, removals or field writes, so the list is
    // consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Vec<TrackedPlant>> {
        self.plants.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn first_mut<'a>(plants: &'a mut [TrackedPlant], id: &str) -> Option<&'a mut TrackedPlant> {
    plants.iter_mut().find(|p| p.id() == id)
}
