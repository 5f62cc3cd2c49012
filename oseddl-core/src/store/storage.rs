//! Key-value persistence backends.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{DeadlineError, DeadlineResult};

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DeadlineResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DeadlineResult<()>;
}

/// One JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> DeadlineResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> DeadlineResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            DeadlineError::Storage(format!("Could not create {}: {e}", self.dir.display()))
        })?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DeadlineResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| DeadlineError::Storage("memory store poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DeadlineResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| DeadlineError::Storage("memory store poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nested"));

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "{\"a\":1}").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(tmp.path().join("nested/k.json").exists());
        assert!(!tmp.path().join("nested/k.json.tmp").exists());
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
    }
}
