//! # Chronicle Core
//!
//! Core library for Chronicle - a personal planner, journal and password
//! vault whose state lives in a local key-value store.
//!
//! This crate provides the data model and the persistence layer
//! independent of any front end.
//!
//! ## Architecture
//!
//! - **storage**: the `PersistenceStore` capability, memory/file stores and
//!   the typed `StorageAccessor`
//! - **usage**: byte usage estimation against a fixed budget
//! - **backup**: export/import of the whole store as one JSON document
//! - **sync**: in-memory state mirrored per entity to storage
//! - **model**: events, credentials, profile, categories and their defaults
//! - **reminder** / **category**: pure helpers over the model

pub mod backup;
pub mod category;
pub mod error;
pub mod fs;
pub mod model;
pub mod reminder;
pub mod storage;
pub mod sync;
pub mod usage;

pub use error::{ChronicleError, Result, StorageError, StorageErrorKind};
pub use storage::{Entity, PersistenceStore, StorageAccessor};
pub use sync::StateSynchronizer;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
