//! Storage usage estimation.
//!
//! Byte accounting assumes 2 bytes per UTF-16 code unit for both keys and
//! values. The total budget is a configured ceiling, not a queried value:
//! backing stores do not reliably expose their quota.

use crate::storage::{Entity, PersistenceStore};

/// Default budget: a conservative estimate of typical per-origin quota.
pub const DEFAULT_BUDGET_BYTES: u64 = 5 * 1024 * 1024;

/// Usage percentage at which the store counts as nearly full.
pub const NEAR_FULL_PERCENT: u8 = 80;

/// Usage percentage at which the store counts as critically full.
pub const CRITICAL_PERCENT: u8 = 95;

/// Bytes charged for one stored key/value pair.
pub fn stored_bytes(key: &str, value: &str) -> u64 {
    let units = key.encode_utf16().count() + value.encode_utf16().count();
    2 * units as u64
}

/// Aggregate usage of a backing store against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    /// Rounded, clamped to 0..=100.
    pub percentage: u8,
}

impl StorageUsage {
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        let percentage = if total_bytes == 0 {
            100
        } else {
            let raw = (used_bytes as f64 / total_bytes as f64 * 100.0).round();
            raw.clamp(0.0, 100.0) as u8
        };
        Self {
            used_bytes,
            total_bytes,
            percentage,
        }
    }

    pub fn is_near_full(&self) -> bool {
        self.percentage >= NEAR_FULL_PERCENT
    }

    pub fn is_critical(&self) -> bool {
        self.percentage >= CRITICAL_PERCENT
    }

    pub fn used_formatted(&self) -> String {
        format_bytes(self.used_bytes)
    }

    pub fn total_formatted(&self) -> String {
        format_bytes(self.total_bytes)
    }
}

/// Bytes held by one entity's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityUsage {
    pub entity: Entity,
    pub bytes: u64,
}

impl EntityUsage {
    pub fn formatted(&self) -> String {
        format_bytes(self.bytes)
    }
}

/// Sum usage over every key in `store`.
///
/// A store whose keys cannot be listed reports zero usage.
pub fn usage<S: PersistenceStore + ?Sized>(store: &S, total_bytes: u64) -> StorageUsage {
    let keys = match store.keys() {
        Ok(keys) => keys,
        Err(err) => {
            tracing::warn!(error = %err, "failed to list storage keys");
            return StorageUsage::new(0, total_bytes);
        }
    };
    let used = keys
        .iter()
        .map(|key| match store.get(key) {
            Ok(Some(value)) => stored_bytes(key, &value),
            _ => 0,
        })
        .sum();
    StorageUsage::new(used, total_bytes)
}

/// Per-entity usage, in entity order. Entities without a value report 0.
pub fn per_entity_usage<S: PersistenceStore + ?Sized>(store: &S) -> Vec<EntityUsage> {
    Entity::ALL
        .into_iter()
        .map(|entity| {
            let key = entity.storage_key();
            let bytes = match store.get(key) {
                Ok(Some(value)) => stored_bytes(key, &value),
                Ok(None) => 0,
                Err(err) => {
                    tracing::warn!(key, error = %err, "failed to read storage key");
                    0
                }
            };
            EntityUsage { entity, bytes }
        })
        .collect()
}

/// Format bytes as B, KB or MB with at most two decimals.
///
/// Trailing zeros are trimmed: `1536` is `"1.5 KB"`, `1024` is `"1 KB"`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
