use crate::app::AppContext;
use crate::cli::ClearArgs;
use crate::errors::CliError;
use crate::ui::{print, receipt};

pub fn handle_clear(ctx: &AppContext, args: &ClearArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    if !args.yes {
        if !ui_ctx.is_interactive() {
            return Err(CliError::invalid_input_with_hint(
                "Refusing to clear all data without confirmation",
                "Hint: Pass --yes to confirm.",
            )
            .into());
        }
        let proceed = dialoguer::Confirm::new()
            .with_prompt("Delete all events, credentials, profile and categories?")
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Clear cancelled"));
        }
    }

    let mut sync = ctx.open()?;
    sync.clear_all();

    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Cleared all data", &[("Restored", "defaults")]),
        );
    }
    Ok(())
}
