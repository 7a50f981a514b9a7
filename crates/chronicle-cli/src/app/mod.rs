//! Application-level utilities for the Chronicle CLI.
//!
//! This module provides:
//! - Path resolution for config and store files
//! - The per-invocation context that opens the store

mod context;
mod resolver;

pub use context::{AppContext, Chronicle};
pub use resolver::{missing_store_message, resolve_config_path, resolve_store_path};
