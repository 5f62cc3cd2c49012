//! Favorites set and its persisted form.

use serde::{Deserialize, Serialize};

use crate::constants::FAVORITES_STORAGE_KEY;
use crate::error::{DeadlineError, DeadlineResult};
use crate::filter::toggle;
use crate::store::storage::KeyValueStore;

/// Favorited event ids (occurrence ids, not series).
///
/// Keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|fav| fav == id)
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &str) {
        toggle(&mut self.0, id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for Favorites {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut favorites = Favorites::new();
        for id in iter {
            if !favorites.contains(&id) {
                favorites.0.push(id);
            }
        }
        favorites
    }
}

/// The persisted slice of app state. Only favorites survive restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    favorites: Favorites,
}

/// Envelope written under [`FAVORITES_STORAGE_KEY`]: `{"state": {...}, "version": 0}`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedEntry {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

const PERSIST_VERSION: u32 = 0;

/// Read favorites back from storage. A missing entry yields an empty set.
pub fn load_favorites(storage: &dyn KeyValueStore) -> DeadlineResult<Favorites> {
    let Some(raw) = storage.get(FAVORITES_STORAGE_KEY)? else {
        return Ok(Favorites::new());
    };

    let entry: PersistedEntry = serde_json::from_str(&raw)
        .map_err(|e| DeadlineError::Storage(format!("Corrupt {FAVORITES_STORAGE_KEY} entry: {e}")))?;
    Ok(entry.state.favorites)
}

pub fn save_favorites(storage: &dyn KeyValueStore, favorites: &Favorites) -> DeadlineResult<()> {
    let entry = PersistedEntry {
        state: PersistedState {
            favorites: favorites.clone(),
        },
        version: PERSIST_VERSION,
    };
    let raw = serde_json::to_string(&entry).map_err(|e| DeadlineError::Serialization(e.to_string()))?;
    storage.set(FAVORITES_STORAGE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStore;

    #[test]
    fn double_toggle_is_identity() {
        let mut favorites: Favorites = ["a".to_string(), "b".to_string()].into_iter().collect();
        let original = favorites.clone();

        favorites.toggle("c");
        assert!(favorites.contains("c"));
        favorites.toggle("c");
        assert_eq!(favorites, original);

        favorites.toggle("a");
        assert!(!favorites.contains("a"));
        favorites.toggle("a");
        assert!(favorites.contains("a"));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn persist_then_load_yields_same_set() {
        let storage = MemoryStore::new();
        let favorites: Favorites = ["rustconf-2025".to_string(), "osc-2024".to_string()].into_iter().collect();

        save_favorites(&storage, &favorites).unwrap();
        assert_eq!(load_favorites(&storage).unwrap(), favorites);
    }

    #[test]
    fn writes_versioned_envelope() {
        let storage = MemoryStore::new();
        let favorites: Favorites = ["x".to_string()].into_iter().collect();
        save_favorites(&storage, &favorites).unwrap();

        let raw = storage.get(FAVORITES_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["state"]["favorites"], serde_json::json!(["x"]));
        assert_eq!(value["version"], 0);
    }

    #[test]
    fn missing_entry_is_empty() {
        let storage = MemoryStore::new();
        assert!(load_favorites(&storage).unwrap().is_empty());
    }

    #[test]
    fn corrupt_entry_is_storage_error() {
        let storage = MemoryStore::new();
        storage.set(FAVORITES_STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(load_favorites(&storage), Err(DeadlineError::Storage(_))));
    }
}
