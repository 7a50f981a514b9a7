//! File-backed persistence store.
//!
//! The whole store is one JSON object on disk (`{"key": "value", ...}`).
//! It is read once on open and rewritten atomically on every change, so a
//! crash mid-write leaves the previous document in place.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ChronicleError, Result};
use crate::fs::write_atomic;
use crate::storage::traits::{PersistenceStore, StoreError};
use crate::usage::stored_bytes;

/// JSON document store with an optional byte budget.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
    budget_bytes: Option<u64>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `ChronicleError::Storage` if the file exists but cannot be
    /// read or is not a JSON object of strings.
    pub fn open(path: &Path, budget_bytes: Option<u64>) -> Result<Self> {
        let items = match std::fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ChronicleError::Storage(format!(
                    "Store file {} is corrupted: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(ChronicleError::Storage(format!(
                    "Failed to read store {}: {}",
                    path.display(),
                    err
                )))
            }
        };
        tracing::debug!(path = %path.display(), keys = items.len(), "opened file store");
        Ok(Self {
            path: path.to_path_buf(),
            items,
            budget_bytes,
        })
    }

    /// Create an empty store file at `path` if none exists, then open it.
    pub fn create(path: &Path, budget_bytes: Option<u64>) -> Result<Self> {
        if !path.exists() {
            write_atomic(path, b"{}")?;
        }
        Self::open(path, budget_bytes)
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> io::Result<()> {
        let contents = serde_json::to_vec(items)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        write_atomic(&self.path, &contents)
    }

    fn check_budget(&self, items: &BTreeMap<String, String>) -> io::Result<()> {
        let Some(budget) = self.budget_bytes else {
            return Ok(());
        };
        let used: u64 = items.iter().map(|(k, v)| stored_bytes(k, v)).sum();
        if used > budget {
            return Err(io::Error::new(
                io::ErrorKind::StorageFull,
                format!("store budget of {} bytes exceeded ({} bytes)", budget, used),
            ));
        }
        Ok(())
    }
}

impl PersistenceStore for FileStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        let mut next = self.items.clone();
        next.insert(key.to_string(), value.to_string());
        self.check_budget(&next)?;
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> std::result::Result<(), StoreError> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut next = self.items.clone();
        next.remove(key);
        self.persist(&next)?;
        self.items = next;
        Ok(())
    }

    fn keys(&self) -> std::result::Result<Vec<String>, StoreError> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::create(&path, None).unwrap();
        store.set("chronicle_events", "[]").unwrap();
        drop(store);

        let reopened = FileStore::open(&path, None).unwrap();
        assert_eq!(
            reopened.get("chronicle_events").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(&dir.path().join("absent.json"), None).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path, None).unwrap_err();
        assert!(matches!(err, ChronicleError::Storage(_)));
    }

    #[test]
    fn test_budget_overflow_keeps_disk_and_memory_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::create(&path, Some(20)).unwrap();
        store.set("k", "small").unwrap();

        let err = store.set("k", "much larger value").unwrap_err();
        match err {
            StoreError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::StorageFull),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));

        let reopened = FileStore::open(&path, None).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_remove_absent_key_does_not_touch_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path, None).unwrap();
        store.remove("nothing").unwrap();
        assert!(!path.exists());
    }
}
