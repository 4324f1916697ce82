// Local persistence.
// A raw key-value store (file-backed in production, in-memory in tests) wrapped by the
// `Persistence` adapter, which owns the record layout and never propagates failures.

pub mod file;
pub mod memory;
pub mod persistence;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use persistence::Persistence;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist record: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Opaque string records addressed by key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
