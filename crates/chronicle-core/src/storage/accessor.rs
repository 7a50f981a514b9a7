//! Typed load/save/remove over a [`PersistenceStore`].
//!
//! The accessor is the only place raw store failures are turned into the
//! storage taxonomy. Loads never fail: they fall back to the caller's
//! default. Saves always return a [`StorageError`] on failure.

use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::storage::traits::{PersistenceStore, StoreError};

/// Key written and removed by the availability probe.
pub const PROBE_KEY: &str = "__storage_test__";

/// Legacy numeric codes that signal an exhausted quota.
const QUOTA_CODES: [u16; 2] = [
    22,   // legacy Chrome
    1014, // Firefox
];

/// Exception names that signal an exhausted quota.
const QUOTA_NAMES: [&str; 2] = ["QuotaExceededError", "NS_ERROR_DOM_QUOTA_REACHED"];

/// When the availability probe runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbePolicy {
    /// Probe before every load and save.
    #[default]
    EveryWrite,
    /// Probe once and reuse the answer.
    Memoized,
}

/// Does this raw store failure mean the byte budget is exhausted?
pub fn is_quota_exceeded(err: &StoreError) -> bool {
    match err {
        StoreError::Rejected { name, code } => {
            QUOTA_NAMES.contains(&name.as_str()) || code.is_some_and(|c| QUOTA_CODES.contains(&c))
        }
        StoreError::Io(io_err) => io_err.kind() == io::ErrorKind::StorageFull,
        StoreError::Other(_) => false,
    }
}

/// Normalize a failed write into the storage taxonomy.
pub fn classify_write_error(err: &StoreError) -> StorageError {
    if is_quota_exceeded(err) {
        StorageError::QuotaExceeded
    } else {
        StorageError::Unknown(err.to_string())
    }
}

/// Typed access to a persistence store.
#[derive(Debug)]
pub struct StorageAccessor<S> {
    store: S,
    policy: ProbePolicy,
    probed: Option<bool>,
}

impl<S: PersistenceStore> StorageAccessor<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, ProbePolicy::default())
    }

    pub fn with_policy(store: S, policy: ProbePolicy) -> Self {
        Self {
            store,
            policy,
            probed: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Check that the store accepts writes by round-tripping a sentinel value.
    ///
    /// A sentinel write rejected with a quota signal still counts as
    /// available: the store works but is full, and the real write reports
    /// `QuotaExceeded`.
    pub fn is_available(&mut self) -> bool {
        if self.policy == ProbePolicy::Memoized {
            if let Some(known) = self.probed {
                return known;
            }
        }
        let available = self.probe();
        self.probed = Some(available);
        available
    }

    fn probe(&mut self) -> bool {
        if let Err(err) = self.store.set(PROBE_KEY, PROBE_KEY) {
            if is_quota_exceeded(&err) {
                tracing::debug!(error = %err, "storage probe hit the quota; store is full");
                return true;
            }
            tracing::debug!(error = %err, "storage probe write failed");
            return false;
        }
        let read_back = self.store.get(PROBE_KEY);
        let removed = self.store.remove(PROBE_KEY);
        match (read_back, removed) {
            (Ok(Some(value)), Ok(())) => value == PROBE_KEY,
            (read_back, removed) => {
                tracing::debug!(?read_back, ?removed, "storage probe round-trip failed");
                false
            }
        }
    }

    /// Read and deserialize the value at `key`, or return `fallback`.
    ///
    /// Never fails: an unavailable store, a missing key, a read error and a
    /// value that does not deserialize as `T` all yield `fallback`.
    pub fn load<T: DeserializeOwned>(&mut self, key: &str, fallback: T) -> T {
        if !self.is_available() {
            tracing::warn!(key, "storage is not available; using fallback");
            return fallback;
        }
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to read from storage");
                return fallback;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to parse stored value; using fallback");
                fallback
            }
        }
    }

    /// Serialize `value` as JSON and write it at `key`.
    ///
    /// # Errors
    ///
    /// - `StorageError::Unavailable` if the availability probe fails
    /// - `StorageError::QuotaExceeded` if the store signals an exhausted budget
    /// - `StorageError::Unknown` for serialization or any other write failure
    ///
    /// On error the previous value at `key` is unchanged.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        if !self.is_available() {
            return Err(StorageError::Unavailable);
        }
        let json =
            serde_json::to_string(value).map_err(|e| StorageError::Unknown(e.to_string()))?;
        self.store.set(key, &json).map_err(|err| {
            let classified = classify_write_error(&err);
            tracing::warn!(key, error = %err, kind = ?classified.kind(), "failed to save to storage");
            classified
        })?;
        tracing::debug!(key, bytes = json.len(), "saved to storage");
        Ok(())
    }

    /// Best-effort delete; failures are logged, not surfaced.
    pub fn remove(&mut self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            tracing::error!(key, error = %err, "failed to remove from storage");
        }
    }
}
