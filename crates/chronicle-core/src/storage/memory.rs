//! In-memory persistence store.
//!
//! Used by tests and by callers that want a throwaway store. It can mimic
//! the failure modes of a browser-style store: a byte budget that raises a
//! quota signal, and a store that refuses writes entirely.

use std::collections::BTreeMap;

use crate::storage::traits::{PersistenceStore, StoreError};
use crate::usage::stored_bytes;

/// Ordered in-memory key-value store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    budget_bytes: Option<u64>,
    quota_signal: (String, Option<u16>),
    unavailable: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Unbounded, writable store.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            budget_bytes: None,
            quota_signal: ("QuotaExceededError".to_string(), Some(22)),
            unavailable: false,
        }
    }

    /// Store that rejects any write pushing usage past `budget_bytes`.
    pub fn with_budget(budget_bytes: u64) -> Self {
        Self {
            budget_bytes: Some(budget_bytes),
            ..Self::new()
        }
    }

    /// Store that rejects every write and delete, like a store disabled by a
    /// privacy mode.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    /// Override the exception name and code raised when the budget is exceeded.
    pub fn with_quota_signal(mut self, name: impl Into<String>, code: Option<u16>) -> Self {
        self.quota_signal = (name.into(), code);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes_with(&self, key: &str, value: &str) -> u64 {
        let others: u64 = self
            .items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| stored_bytes(k, v))
            .sum();
        others + stored_bytes(key, value)
    }

    fn refuse(&self) -> StoreError {
        StoreError::rejected("SecurityError", Some(18))
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(self.refuse());
        }
        if let Some(budget) = self.budget_bytes {
            if self.used_bytes_with(key, value) > budget {
                let (name, code) = &self.quota_signal;
                return Err(StoreError::rejected(name.clone(), *code));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(self.refuse());
        }
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_rejects_and_keeps_previous_value() {
        // "k" + "ab" = 3 chars = 6 bytes
        let mut store = MemoryStore::with_budget(6);
        store.set("k", "ab").unwrap();

        let err = store.set("k", "abc").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Rejected { ref name, code: Some(22) } if name == "QuotaExceededError"
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("ab"));
    }

    #[test]
    fn test_budget_counts_replacement_not_sum() {
        let mut store = MemoryStore::with_budget(8);
        store.set("k", "abc").unwrap();
        store.set("k", "xyz").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("xyz"));
    }

    #[test]
    fn test_custom_quota_signal() {
        let mut store =
            MemoryStore::with_budget(0).with_quota_signal("NS_ERROR_DOM_QUOTA_REACHED", Some(1014));
        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, StoreError::Rejected { code: Some(1014), .. }));
    }

    #[test]
    fn test_unavailable_rejects_writes() {
        let mut store = MemoryStore::unavailable();
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
        assert!(store.is_empty());
    }
}
