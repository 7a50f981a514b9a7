//! Application state synchronizer.
//!
//! Holds the four in-memory collections and mirrors each one to storage
//! independently: a change to events writes only the events key. The
//! in-memory state is the source of truth; a failed write leaves the new
//! value committed in memory and reports the failure to the caller and to
//! the optional error sink.

use chrono::NaiveDate;

use crate::backup::{export_all, import_all, ImportReport};
use crate::category::validate_category_name;
use crate::error::{ChronicleError, Result, StorageError};
use crate::model::{
    default_categories, default_credentials, default_events, CategoryItem, ChronicleState,
    Credential, PlanEvent, UserProfile,
};
use crate::reminder::active_reminders;
use crate::storage::{Entity, PersistenceStore, StorageAccessor};
use crate::usage::{per_entity_usage, usage, EntityUsage, StorageUsage, DEFAULT_BUDGET_BYTES};

/// Result of mirroring one entity to storage.
pub type SaveResult = std::result::Result<(), StorageError>;

/// Receives every failed write made on behalf of a state change.
pub trait ErrorSink {
    fn save_failed(&mut self, entity: Entity, error: &StorageError);
}

impl<F> ErrorSink for F
where
    F: FnMut(Entity, &StorageError),
{
    fn save_failed(&mut self, entity: Entity, error: &StorageError) {
        self(entity, error)
    }
}

/// In-memory state mirrored per entity through a [`StorageAccessor`].
pub struct StateSynchronizer<S> {
    accessor: StorageAccessor<S>,
    state: ChronicleState,
    today: NaiveDate,
    budget_bytes: u64,
    sink: Option<Box<dyn ErrorSink>>,
}

impl<S: PersistenceStore> StateSynchronizer<S> {
    /// Seed state by loading each entity once, falling back to the defaults.
    pub fn mount(accessor: StorageAccessor<S>, today: NaiveDate) -> Self {
        let mut sync = Self {
            accessor,
            state: ChronicleState::defaults(today),
            today,
            budget_bytes: DEFAULT_BUDGET_BYTES,
            sink: None,
        };
        sync.reload();
        sync
    }

    /// Forward every failed write to `sink`.
    pub fn with_error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Budget used by [`usage`](Self::usage).
    pub fn with_budget(mut self, budget_bytes: u64) -> Self {
        self.budget_bytes = budget_bytes;
        self
    }

    /// Re-read every entity from storage, replacing in-memory state.
    pub fn reload(&mut self) {
        let accessor = &mut self.accessor;
        self.state = ChronicleState {
            events: accessor.load(Entity::Events.storage_key(), default_events(self.today)),
            credentials: accessor.load(Entity::Credentials.storage_key(), default_credentials()),
            profile: accessor.load(Entity::UserProfile.storage_key(), UserProfile::default()),
            categories: accessor.load(Entity::Categories.storage_key(), default_categories()),
        };
        tracing::debug!(
            events = self.state.events.len(),
            credentials = self.state.credentials.len(),
            categories = self.state.categories.len(),
            "loaded state from storage"
        );
    }

    pub fn state(&self) -> &ChronicleState {
        &self.state
    }

    pub fn events(&self) -> &[PlanEvent] {
        &self.state.events
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.state.credentials
    }

    pub fn profile(&self) -> &UserProfile {
        &self.state.profile
    }

    pub fn categories(&self) -> &[CategoryItem] {
        &self.state.categories
    }

    pub fn accessor(&self) -> &StorageAccessor<S> {
        &self.accessor
    }

    pub fn into_accessor(self) -> StorageAccessor<S> {
        self.accessor
    }

    // --- Per-entity writes ---

    pub fn set_events(&mut self, events: Vec<PlanEvent>) -> SaveResult {
        self.state.events = events;
        self.persist(Entity::Events)
    }

    pub fn set_credentials(&mut self, credentials: Vec<Credential>) -> SaveResult {
        self.state.credentials = credentials;
        self.persist(Entity::Credentials)
    }

    pub fn set_profile(&mut self, profile: UserProfile) -> SaveResult {
        self.state.profile = profile;
        self.persist(Entity::UserProfile)
    }

    pub fn set_categories(&mut self, categories: Vec<CategoryItem>) -> SaveResult {
        self.state.categories = categories;
        self.persist(Entity::Categories)
    }

    pub fn update_events(&mut self, f: impl FnOnce(&mut Vec<PlanEvent>)) -> SaveResult {
        f(&mut self.state.events);
        self.persist(Entity::Events)
    }

    pub fn update_credentials(&mut self, f: impl FnOnce(&mut Vec<Credential>)) -> SaveResult {
        f(&mut self.state.credentials);
        self.persist(Entity::Credentials)
    }

    pub fn update_categories(&mut self, f: impl FnOnce(&mut Vec<CategoryItem>)) -> SaveResult {
        f(&mut self.state.categories);
        self.persist(Entity::Categories)
    }

    fn persist(&mut self, entity: Entity) -> SaveResult {
        let key = entity.storage_key();
        let result = match entity {
            Entity::Events => self.accessor.save(key, &self.state.events),
            Entity::Credentials => self.accessor.save(key, &self.state.credentials),
            Entity::UserProfile => self.accessor.save(key, &self.state.profile),
            Entity::Categories => self.accessor.save(key, &self.state.categories),
        };
        if let Err(ref err) = result {
            if let Some(sink) = self.sink.as_mut() {
                sink.save_failed(entity, err);
            }
        }
        result
    }

    // --- Events ---

    /// Insert `event`, or replace the event with the same id.
    pub fn save_event(&mut self, event: PlanEvent) -> Result<()> {
        self.update_events(|events| match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        })?;
        Ok(())
    }

    pub fn delete_event(&mut self, id: &str) -> Result<()> {
        if !self.state.events.iter().any(|e| e.id == id) {
            return Err(ChronicleError::NotFound(format!("Event {}", id)));
        }
        self.update_events(|events| events.retain(|e| e.id != id))?;
        Ok(())
    }

    pub fn dismiss_reminder(&mut self, id: &str) -> Result<()> {
        if !self.state.events.iter().any(|e| e.id == id) {
            return Err(ChronicleError::NotFound(format!("Event {}", id)));
        }
        self.update_events(|events| {
            for event in events.iter_mut().filter(|e| e.id == id) {
                event.is_reminder_dismissed = true;
            }
        })?;
        Ok(())
    }

    /// Events whose reminders are active on `today`.
    pub fn active_reminders(&self, today: NaiveDate) -> Vec<&PlanEvent> {
        active_reminders(&self.state.events, today)
    }

    // --- Credentials ---

    pub fn add_credential(&mut self, credential: Credential) -> Result<()> {
        self.update_credentials(|credentials| credentials.push(credential))?;
        Ok(())
    }

    pub fn delete_credential(&mut self, id: &str) -> Result<()> {
        if !self.state.credentials.iter().any(|c| c.id == id) {
            return Err(ChronicleError::NotFound(format!("Credential {}", id)));
        }
        self.update_credentials(|credentials| credentials.retain(|c| c.id != id))?;
        Ok(())
    }

    // --- Profile ---

    pub fn save_profile(&mut self, profile: UserProfile) -> Result<()> {
        if profile.name.trim().is_empty() {
            return Err(ChronicleError::Validation(
                "Profile name cannot be empty".to_string(),
            ));
        }
        self.set_profile(profile)?;
        Ok(())
    }

    /// Replace the avatar. Oversized or malformed images change nothing.
    pub fn set_avatar(&mut self, data_uri: &str) -> Result<()> {
        let mut profile = self.state.profile.clone();
        profile.set_avatar(data_uri)?;
        self.set_profile(profile)?;
        Ok(())
    }

    // --- Categories ---

    pub fn add_category(&mut self, name: &str, color: &str) -> Result<CategoryItem> {
        let name = validate_category_name(name, &self.state.categories, None)?;
        let item = CategoryItem::new(name, color);
        let added = item.clone();
        self.update_categories(|categories| categories.push(item))?;
        Ok(added)
    }

    /// Rename or recolor a category. References by the old name are not rewritten.
    pub fn update_category(&mut self, item: CategoryItem) -> Result<()> {
        if !self.state.categories.iter().any(|c| c.id == item.id) {
            return Err(ChronicleError::NotFound(format!("Category {}", item.id)));
        }
        let name = validate_category_name(&item.name, &self.state.categories, Some(item.id.as_str()))?;
        let item = CategoryItem { name, ..item };
        self.update_categories(|categories| {
            if let Some(existing) = categories.iter_mut().find(|c| c.id == item.id) {
                *existing = item;
            }
        })?;
        Ok(())
    }

    /// Delete a category by id. The last remaining category cannot be deleted.
    pub fn delete_category(&mut self, id: &str) -> Result<()> {
        if !self.state.categories.iter().any(|c| c.id == id) {
            return Err(ChronicleError::NotFound(format!("Category {}", id)));
        }
        if self.state.categories.len() <= 1 {
            return Err(ChronicleError::Validation(
                "At least one category must remain".to_string(),
            ));
        }
        self.update_categories(|categories| categories.retain(|c| c.id != id))?;
        Ok(())
    }

    // --- Whole-store operations ---

    /// Remove every entity from storage and reset state to the defaults.
    pub fn clear_all(&mut self) {
        for entity in Entity::ALL {
            self.accessor.remove(entity.storage_key());
        }
        self.state = ChronicleState::defaults(self.today);
        tracing::info!("cleared all stored data");
    }

    pub fn export_backup(&self) -> Result<String> {
        export_all(self.accessor.store())
    }

    /// Import a backup document, then reload state from storage.
    ///
    /// State is reloaded even when the import fails part-way, so memory
    /// reflects whatever was written.
    pub fn import_backup(&mut self, json: &str) -> std::result::Result<ImportReport, StorageError> {
        let result = import_all(&mut self.accessor, json);
        self.reload();
        result
    }

    pub fn usage(&self) -> StorageUsage {
        usage(self.accessor.store(), self.budget_bytes)
    }

    pub fn per_entity_usage(&self) -> Vec<EntityUsage> {
        per_entity_usage(self.accessor.store())
    }
}
