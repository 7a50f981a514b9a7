//! Category lookups by name.
//!
//! Events and credentials reference categories by name. Deleting a category
//! does not cascade: the orphaned names stay in place and resolve to
//! [`UNKNOWN_CATEGORY`] when displayed.

use std::collections::BTreeSet;

use crate::error::{ChronicleError, Result};
use crate::model::{CategoryItem, ChronicleState};

/// Color tokens offered for new categories.
pub const CATEGORY_COLORS: [&str; 10] = [
    "bg-charcoal",
    "bg-sage",
    "bg-peach",
    "bg-terra",
    "bg-indigo-400",
    "bg-blue-500",
    "bg-green-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-orange-500",
];

/// Display stand-in for a category name that matches no item.
pub const UNKNOWN_CATEGORY: UnknownCategory = UnknownCategory {
    name: "Uncategorized",
    color: "bg-charcoal",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCategory {
    pub name: &'static str,
    pub color: &'static str,
}

/// Result of resolving a category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef<'a> {
    Known(&'a CategoryItem),
    Unknown,
}

impl CategoryRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            CategoryRef::Known(item) => &item.name,
            CategoryRef::Unknown => UNKNOWN_CATEGORY.name,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            CategoryRef::Known(item) => &item.color,
            CategoryRef::Unknown => UNKNOWN_CATEGORY.color,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CategoryRef::Known(_))
    }
}

pub fn resolve_category<'a>(name: &str, categories: &'a [CategoryItem]) -> CategoryRef<'a> {
    categories
        .iter()
        .find(|item| item.name == name)
        .map(CategoryRef::Known)
        .unwrap_or(CategoryRef::Unknown)
}

/// Category names referenced by events or credentials that match no item.
pub fn orphaned_references(state: &ChronicleState) -> BTreeSet<String> {
    let event_refs = state.events.iter().map(|e| e.category.as_str());
    let credential_refs = state.credentials.iter().map(|c| c.category.as_str());
    event_refs
        .chain(credential_refs)
        .filter(|name| !resolve_category(name, &state.categories).is_known())
        .map(String::from)
        .collect()
}

/// Validate a new or renamed category against the existing list.
///
/// `exclude_id` skips the item being renamed.
pub fn validate_category_name(
    name: &str,
    categories: &[CategoryItem],
    exclude_id: Option<&str>,
) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ChronicleError::Validation(
            "Category name cannot be empty".to_string(),
        ));
    }
    let taken = categories
        .iter()
        .filter(|item| Some(item.id.as_str()) != exclude_id)
        .any(|item| item.name == trimmed);
    if taken {
        return Err(ChronicleError::Validation(format!(
            "Category \"{}\" already exists",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}
