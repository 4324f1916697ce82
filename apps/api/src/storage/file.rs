use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::storage::{KeyValueStore, StorageError};

/// One JSON file per key under a data directory. Writes go through a temp file in the same
/// directory and are renamed into place, so a crash never leaves a half-written record.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        let path = self.path_for(key);
        tmp.persist(&path)?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(r#"{"a":1}"#));

        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn test_keys_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.json").exists());
        assert_eq!(store.get("../escape").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("cv_builder_data", "{}").unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["cv_builder_data.json".to_string()]);
    }
}
