//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, ChronicleConfig};

/// Resolve the config file path, checking CHRONICLE_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("CHRONICLE_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store path: `--store`/`CHRONICLE_STORE`, then config, then the
/// XDG default.
pub fn resolve_store_path(cli: &Cli, config: Option<&ChronicleConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.clone() {
        return Ok(path);
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_store_path()
}

/// Error message when the store file is missing.
pub fn missing_store_message(path: &Path) -> String {
    format!("No store found at {}", path.display())
}
