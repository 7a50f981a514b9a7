//! Persistence store trait definition.
//!
//! The `PersistenceStore` trait is the capability the storage accessor is
//! handed explicitly. It mirrors a synchronous, per-origin key-value
//! primitive: string keys, string values, an opaque total quota.
//! Implementations report raw failures as [`StoreError`]; normalizing those
//! into the storage taxonomy is the accessor's job.

use std::io;

use thiserror::Error;

/// Raw failure reported by a backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store raised a named exception, optionally with a legacy numeric code.
    ///
    /// Different environments report the same condition under different
    /// names and codes (e.g. `QuotaExceededError`/22 vs
    /// `NS_ERROR_DOM_QUOTA_REACHED`/1014).
    #[error("{name} (code {code:?})")]
    Rejected { name: String, code: Option<u16> },

    /// Filesystem-level failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    pub fn rejected(name: impl Into<String>, code: Option<u16>) -> Self {
        StoreError::Rejected {
            name: name.into(),
            code,
        }
    }
}

/// Synchronous key-value backing store.
///
/// All implementations must ensure:
/// - `set` is atomic per key: on error the previous value is intact
/// - `keys` lists exactly the keys `get` would return a value for
pub trait PersistenceStore {
    /// Read the raw value at `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// List every key currently holding a value.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<T: PersistenceStore + ?Sized> PersistenceStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_trait_is_object_safe() {
        let mut store: Box<dyn PersistenceStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_rejected_display_includes_code() {
        let err = StoreError::rejected("QuotaExceededError", Some(22));
        assert_eq!(err.to_string(), "QuotaExceededError (code Some(22))");
    }
}
