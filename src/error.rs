use thiserror::Error;

/// Failures at the persistent storage boundary.
///
/// The collection store never propagates these to its callers; they surface
/// only from the storage backends themselves and in logs.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// The built-in catalog documents are malformed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate species id: {0}")]
    DuplicateSpecies(String),

    #[error("Duplicate tip id: {0}")]
    DuplicateTip(String),

    #[error("Species {0} has a minimum temperature above its maximum")]
    InvalidTemperature(String),
}

/// Rejections from collection operations that check their input.
///
/// The id-keyed mutations (remove, update, water, fertilize) never fail: an
/// unknown id is a no-op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Plant {0} is already in the collection")]
    AlreadyTracked(String),

    #[error("Species not found: {0}")]
    UnknownSpecies(String),
}
