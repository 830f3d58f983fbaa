use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::PersistenceError;
use crate::fixtures;
use crate::kv::KeyValueStore;

/// In-process store used as a test double and for the sample data set.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the sample teams, matches and grounds.
    pub fn seeded() -> Result<Self, PersistenceError> {
        let store = Self::new();
        for (key, value) in fixtures::sample_entries()? {
            store.insert(key, value);
        }
        Ok(store)
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("teams").await.unwrap(), None);
        store.set("teams", "[]".into()).await.unwrap();
        assert_eq!(store.get("teams").await.unwrap().as_deref(), Some("[]"));
        store.remove("teams").await.unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_seeded_has_sample_keys() {
        let store = MemoryStore::seeded().unwrap();
        assert!(store.raw("teams").is_some());
        assert!(store.raw("matches").is_some());
        assert!(store.raw("grounds").is_some());
        assert!(store.raw("tournaments").is_none());
    }
}
