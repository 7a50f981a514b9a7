use std::io::Read;

use crate::app::AppContext;
use crate::cli::ImportArgs;
use crate::errors::CliError;
use crate::ui::{print, receipt, warning};

fn read_backup(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(file).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => anyhow::Error::from(CliError::not_found(
            format!("Backup file not found: {}", file),
            "Hint: Create one with `chronicle export`.",
        )),
        _ => anyhow::anyhow!("Failed to read backup {}: {}", file, e),
    })
}

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let document = read_backup(&args.file)?;
    let mut sync = ctx.open()?;
    let report = sync.import_backup(&document)?;

    if !report.ignored.is_empty() {
        warning(
            &ui_ctx,
            &format!("Ignored unknown fields: {}", report.ignored.join(", ")),
        );
    }
    if !ctx.quiet() {
        let imported: Vec<&str> = report.imported.iter().map(|e| e.backup_name()).collect();
        let imported = if imported.is_empty() {
            "nothing".to_string()
        } else {
            imported.join(", ")
        };
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Imported backup", &[("Entities", imported.as_str())]),
        );
    }
    Ok(())
}
