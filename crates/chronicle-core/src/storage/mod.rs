//! Persistence layer for Chronicle.
//!
//! ## Architecture
//!
//! - **traits**: the `PersistenceStore` capability (`get/set/remove/keys`)
//! - **memory** / **file**: store implementations
//! - **accessor**: typed load/save with availability probe and quota
//!   normalization
//! - **keys**: the namespaced key of each persisted entity
//!
//! Stores are handed to the accessor explicitly; nothing in the core reaches
//! for a global store.

pub mod accessor;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

// Re-export public types
pub use accessor::{classify_write_error, is_quota_exceeded, ProbePolicy, StorageAccessor};
pub use file::FileStore;
pub use keys::Entity;
pub use memory::MemoryStore;
pub use traits::{PersistenceStore, StoreError};
