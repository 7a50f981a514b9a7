use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use chronicle_core::fs::write_atomic;
use chronicle_core::storage::ProbePolicy;

use crate::constants::APP_NAME;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronicleConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
    /// Byte ceiling enforced by the file store; unset means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_bytes: Option<u64>,
    #[serde(default)]
    pub probe: ProbeSetting,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSection {
    /// Force color on or off; unset follows the terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProbeSetting {
    EveryWrite,
    /// Default for the file store: each probe write is a full atomic rewrite.
    #[default]
    Memoized,
}

impl From<ProbeSetting> for ProbePolicy {
    fn from(setting: ProbeSetting) -> Self {
        match setting {
            ProbeSetting::EveryWrite => ProbePolicy::EveryWrite,
            ProbeSetting::Memoized => ProbePolicy::Memoized,
        }
    }
}

impl ChronicleConfig {
    pub fn new(store_path: PathBuf, budget_bytes: Option<u64>) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
                budget_bytes,
                probe: ProbeSetting::default(),
            },
            ui: UiSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("store.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<ChronicleConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &ChronicleConfig) -> anyhow::Result<()> {
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_NAME));
        }
    }
    Ok(home_dir()?.join(".config").join(APP_NAME))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_NAME));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join(APP_NAME))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ChronicleConfig = toml::from_str("[store]\npath = \"/tmp/store.json\"\n")
            .expect("parse config");
        assert_eq!(config.store.path, "/tmp/store.json");
        assert_eq!(config.store.budget_bytes, None);
        assert_eq!(config.store.probe, ProbeSetting::Memoized);
        assert_eq!(config.ui.color, None);
    }

    #[test]
    fn test_full_config() {
        let config: ChronicleConfig = toml::from_str(
            "[store]\npath = \"s.json\"\nbudget_bytes = 1024\nprobe = \"memoized\"\n\n[ui]\ncolor = false\n",
        )
        .expect("parse config");
        assert_eq!(config.store.budget_bytes, Some(1024));
        assert_eq!(ProbePolicy::from(config.store.probe), ProbePolicy::Memoized);
        assert_eq!(config.ui.color, Some(false));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let config = ChronicleConfig::new(dir.path().join("store.json"), Some(4096));
        write_config(&path, &config).expect("write config");
        assert_eq!(read_config(&path).expect("read config"), config);
    }

    #[test]
    fn test_unknown_probe_rejected() {
        let parsed: Result<ChronicleConfig, _> =
            toml::from_str("[store]\npath = \"s.json\"\nprobe = \"sometimes\"\n");
        assert!(parsed.is_err());
    }
}
