//! Local key-value store
//!
//! Text values addressed by key, one file per key under the data directory
//! (`<data_dir>/<key>.json`). Writes go through a temp file and a rename so a
//! crash never leaves a half-written value behind.

use crate::storage::error::{StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// Key holding the full item collection
pub const ITEMS_KEY: &str = "shopItems";

/// Key holding the singleton investment record
pub const INVESTMENT_KEY: &str = "dailyData";

/// File-backed key-value store
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the value stored under `key`, if any
    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;

        tracing::debug!(key = %key, bytes = value.len(), "Stored value");
        Ok(())
    }

    /// Remove `key`; removing a missing key is not an error
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key = %key, "Removed value");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_get_missing_key() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert_eq!(store.get(ITEMS_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store.set(INVESTMENT_KEY, r#"{"investment":10,"date":"2024-05-06"}"#).unwrap();
        assert_eq!(
            store.get(INVESTMENT_KEY).unwrap().as_deref(),
            Some(r#"{"investment":10,"date":"2024-05-06"}"#)
        );
        assert!(dir.path().join("dailyData.json").exists());

        store.set(INVESTMENT_KEY, "{}").unwrap();
        assert_eq!(store.get(INVESTMENT_KEY).unwrap().as_deref(), Some("{}"));

        store.remove(INVESTMENT_KEY).unwrap();
        assert_eq!(store.get(INVESTMENT_KEY).unwrap(), None);

        // Removing twice is fine
        store.remove(INVESTMENT_KEY).unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = LocalStore::open(&nested).unwrap();
        store.set(ITEMS_KEY, "[]").unwrap();
        assert!(nested.join("shopItems.json").exists());
    }
}
