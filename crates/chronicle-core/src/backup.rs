//! Backup export and import.
//!
//! A backup document is one JSON object with up to four fields (`EVENTS`,
//! `CREDENTIALS`, `USER_PROFILE`, `CATEGORIES`), each holding the parsed
//! stored value. Import is a merge: only entities present in the document
//! are written, and a failing write aborts without undoing earlier ones.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, StorageError};
use crate::model::{CategoryItem, Credential, PlanEvent, UserProfile};
use crate::storage::{Entity, PersistenceStore, StorageAccessor};

/// Outcome of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Entities written, in write order.
    pub imported: Vec<Entity>,
    /// Top-level fields that matched no entity.
    pub ignored: Vec<String>,
}

/// Conventional file name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("chronicle-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize every stored entity into one pretty-printed backup document.
///
/// Entities without a stored value are omitted. A stored value that is not
/// valid JSON is exported as a plain string.
pub fn export_all<S: PersistenceStore + ?Sized>(store: &S) -> Result<String> {
    let mut document = Map::new();
    for entity in Entity::ALL {
        let raw = match store.get(entity.storage_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(entity = %entity, error = %err, "skipping unreadable entity in export");
                continue;
            }
        };
        let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        document.insert(entity.backup_name().to_string(), value);
    }
    Ok(serde_json::to_string_pretty(&Value::Object(document))?)
}

/// Restore entities from a backup document.
///
/// # Errors
///
/// - `StorageError::InvalidBackupFormat` if `json` is not a JSON object or a
///   recognized field does not deserialize as its entity; nothing is written
/// - the first failing save, after earlier entities were already written
pub fn import_all<S: PersistenceStore>(
    accessor: &mut StorageAccessor<S>,
    json: &str,
) -> std::result::Result<ImportReport, StorageError> {
    let parsed: Value = serde_json::from_str(json).map_err(|e| {
        tracing::warn!(error = %e, "backup is not valid JSON");
        StorageError::InvalidBackupFormat(e.to_string())
    })?;
    let Value::Object(document) = parsed else {
        return Err(StorageError::InvalidBackupFormat(
            "backup must be a JSON object".to_string(),
        ));
    };

    let mut report = ImportReport::default();
    let mut pending = Vec::new();
    for (name, value) in &document {
        match Entity::from_backup_name(name) {
            Some(entity) => {
                if value.is_null() {
                    continue;
                }
                check_shape(entity, value)?;
                pending.push((entity, value));
            }
            None => report.ignored.push(name.clone()),
        }
    }
    pending.sort_by_key(|(entity, _)| *entity);

    for (entity, value) in pending {
        accessor.save(entity.storage_key(), value)?;
        tracing::info!(entity = %entity, "imported entity from backup");
        report.imported.push(entity);
    }
    if !report.ignored.is_empty() {
        tracing::debug!(ignored = ?report.ignored, "ignored unrecognized backup fields");
    }
    Ok(report)
}

/// Reject a field whose value would not load back as the entity's type.
fn check_shape(entity: Entity, value: &Value) -> std::result::Result<(), StorageError> {
    match entity {
        Entity::Events => conforms::<Vec<PlanEvent>>(entity, value),
        Entity::Credentials => conforms::<Vec<Credential>>(entity, value),
        Entity::UserProfile => conforms::<UserProfile>(entity, value),
        Entity::Categories => conforms::<Vec<CategoryItem>>(entity, value),
    }
}

fn conforms<T: DeserializeOwned>(
    entity: Entity,
    value: &Value,
) -> std::result::Result<(), StorageError> {
    T::deserialize(value).map(|_| ()).map_err(|e| {
        tracing::warn!(entity = %entity, error = %e, "backup field has the wrong shape");
        StorageError::InvalidBackupFormat(format!("{} has the wrong shape: {}", entity, e))
    })
}
