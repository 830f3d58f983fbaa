use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::PersistenceError;
use crate::kv::KeyValueStore;

/// File-per-key store. Each key is kept as `<dir>/<key>.json`.
///
/// Writes land in a temp file next to the target and are renamed over it, so
/// readers see either the old array or the new one, never a partial write.
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

    pub fn ensure_dir(&self) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read the raw value for a key. Returns None if not found.
    pub fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.file_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    pub fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.ensure_dir()?;
        let path = self.file_path(key);
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));
        if let Err(e) = std::fs::write(&tmp, value).and_then(|_| std::fs::rename(&tmp, &path)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Wrote key");
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.file_path(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.read(key)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.write(key, &value)
    }

    async fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        store.write("teams", "[]").unwrap();
        assert_eq!(store.read("teams").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_read_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        assert_eq!(store.read("teams").unwrap(), None);
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write("matches", "[1]").unwrap();
        store.write("matches", "[1,2]").unwrap();
        assert_eq!(store.read("matches").unwrap().as_deref(), Some("[1,2]"));

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["matches.json".to_string()]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write("teams", "[]").unwrap();
        store.delete("teams").unwrap();
        store.delete("teams").unwrap();
        assert_eq!(store.read("teams").unwrap(), None);
    }

    #[tokio::test]
    async fn test_trait_impl() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("tournaments", "[]".to_string()).await.unwrap();
        assert_eq!(
            store.get("tournaments").await.unwrap().as_deref(),
            Some("[]")
        );
        store.remove("tournaments").await.unwrap();
        assert_eq!(store.get("tournaments").await.unwrap(), None);
    }
}
