use std::path::PathBuf;

use chronicle_core::backup::backup_file_name;
use chronicle_core::fs::write_atomic;

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::ui::{print, receipt};

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let sync = ctx.open()?;
    let document = sync.export_backup()?;

    if args.output.as_deref() == Some("-") {
        println!("{}", document);
        return Ok(());
    }

    let destination = match args.output.as_deref() {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(backup_file_name(ctx.today())),
    };
    write_atomic(&destination, document.as_bytes()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to write backup destination {}: {}",
            destination.display(),
            e
        )
    })?;
    tracing::info!(path = %destination.display(), bytes = document.len(), "exported backup");

    if !ctx.quiet() {
        let path = destination.display().to_string();
        let bytes = document.len().to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Exported backup",
                &[("Path", path.as_str()), ("Bytes", bytes.as_str())],
            ),
        );
    }
    Ok(())
}
