//! Namespaced keys for the persisted entities.

use std::fmt;

/// One of the four top-level persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Events,
    Credentials,
    UserProfile,
    Categories,
}

impl Entity {
    /// Every entity, in export/import order.
    pub const ALL: [Entity; 4] = [
        Entity::Events,
        Entity::Credentials,
        Entity::UserProfile,
        Entity::Categories,
    ];

    /// Key under which the entity is stored in the backing store.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Entity::Events => "chronicle_events",
            Entity::Credentials => "chronicle_credentials",
            Entity::UserProfile => "chronicle_user_profile",
            Entity::Categories => "chronicle_categories",
        }
    }

    /// Field name used for the entity in a backup document.
    pub fn backup_name(&self) -> &'static str {
        match self {
            Entity::Events => "EVENTS",
            Entity::Credentials => "CREDENTIALS",
            Entity::UserProfile => "USER_PROFILE",
            Entity::Categories => "CATEGORIES",
        }
    }

    pub fn from_backup_name(name: &str) -> Option<Entity> {
        Entity::ALL
            .into_iter()
            .find(|entity| entity.backup_name() == name)
    }

    pub fn from_storage_key(key: &str) -> Option<Entity> {
        Entity::ALL
            .into_iter()
            .find(|entity| entity.storage_key() == key)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.backup_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_resolve_both_ways() {
        for entity in Entity::ALL {
            assert_eq!(Entity::from_backup_name(entity.backup_name()), Some(entity));
            assert_eq!(Entity::from_storage_key(entity.storage_key()), Some(entity));
        }
        assert_eq!(Entity::from_backup_name("BOGUS"), None);
        assert_eq!(Entity::from_storage_key("chronicle_notes"), None);
    }
}
