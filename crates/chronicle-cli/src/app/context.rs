//! Application context for the Chronicle CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config and opens the
//! synchronizer every data command works through.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use once_cell::unsync::OnceCell;

use chronicle_core::storage::{FileStore, StorageAccessor};
use chronicle_core::usage::DEFAULT_BUDGET_BYTES;
use chronicle_core::{Entity, StateSynchronizer, StorageError};

use crate::cli::Cli;
use crate::config::{read_config, ChronicleConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{missing_store_message, resolve_config_path, resolve_store_path};

/// Synchronizer over the file-backed store.
pub type Chronicle = StateSynchronizer<FileStore>;

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<ChronicleConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&ChronicleConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no config file");
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    /// UI context for a command. A broken config only loses the color setting.
    pub fn ui_context(&self, json: bool) -> UiContext {
        let color = self
            .config()
            .ok()
            .flatten()
            .and_then(|config| config.ui.color);
        UiContext::from_env(json, self.cli.no_color, color)
    }

    /// The date reminders and default events are evaluated against.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Open the store and mount the synchronizer.
    pub fn open(&self) -> anyhow::Result<Chronicle> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                missing_store_message(&path),
                "Hint: Run `chronicle init` or pass --store <PATH>.",
            )
            .into());
        }

        let config = self.config()?;
        let budget = config.and_then(|c| c.store.budget_bytes);
        let probe = config.map(|c| c.store.probe).unwrap_or_default();

        let store = FileStore::open(&path, budget)?;
        tracing::debug!(path = %path.display(), ?budget, "opened store");
        let accessor = StorageAccessor::with_policy(store, probe.into());
        let sync = StateSynchronizer::mount(accessor, self.today())
            .with_budget(budget.unwrap_or(DEFAULT_BUDGET_BYTES))
            .with_error_sink(|entity: Entity, err: &StorageError| {
                tracing::error!(entity = %entity, kind = ?err.kind(), error = %err, "save failed");
            });
        Ok(sync)
    }
}
