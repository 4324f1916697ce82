use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::storage::{KeyValueStore, StorageError};

/// Process-local store. Used by tests and by `DATA_DIR=:memory:`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned<T>(_: PoisonError<T>) -> StorageError {
        StorageError::Unavailable("memory store lock poisoned".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let records = self.records.lock().map_err(Self::poisoned)?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(Self::poisoned)?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(Self::poisoned)?;
        records.remove(key);
        Ok(())
    }
}
