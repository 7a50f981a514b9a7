use chronicle_core::storage::FileStore;
use chronicle_core::VERSION;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, ChronicleConfig};
use crate::errors::CliError;
use crate::ui::theme::{styled, styles};
use crate::ui::{print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input_with_hint(
            format!("Config already exists at {}", config_path.display()),
            "Hint: Pass --force to overwrite it. Stored data is kept either way.",
        )
        .into());
    }

    let store_path = match args.path.clone().or_else(|| ctx.cli().store.clone()) {
        Some(path) => path,
        None => default_store_path()?,
    };
    let existed = store_path.exists();

    // Opening validates an existing store instead of clobbering it.
    FileStore::create(&store_path, args.budget_bytes)?;
    let config = ChronicleConfig::new(store_path.clone(), args.budget_bytes);
    write_config(&config_path, &config)?;
    tracing::info!(
        config = %config_path.display(),
        store = %store_path.display(),
        "initialized chronicle"
    );

    if ctx.quiet() {
        return Ok(());
    }
    if ui_ctx.mode.is_pretty() {
        let version_line = format!("Chronicle v{}", VERSION);
        println!("{}", styled(&version_line, styles::dim(), ui_ctx.color));
    }
    let store_display = store_path.display().to_string();
    let config_display = config_path.display().to_string();
    let budget = args
        .budget_bytes
        .map(|b| b.to_string())
        .unwrap_or_else(|| "unlimited".to_string());
    let title = if existed {
        "Using existing store"
    } else {
        "Created store"
    };
    print(
        &ui_ctx,
        &receipt(
            &ui_ctx,
            title,
            &[
                ("Store", store_display.as_str()),
                ("Config", config_display.as_str()),
                ("Budget bytes", budget.as_str()),
            ],
        ),
    );
    Ok(())
}
