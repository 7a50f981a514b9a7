use crate::app::AppContext;
use crate::cli::UsageArgs;
use crate::output::print_usage;
use crate::ui::{header, print, warning};

pub fn handle_usage(ctx: &AppContext, args: &UsageArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let sync = ctx.open()?;
    let usage = sync.usage();
    let entities = sync.per_entity_usage();

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "usage", None));
    }
    print_usage(&ui_ctx, &usage, &entities)?;

    if usage.is_critical() {
        warning(
            &ui_ctx,
            &format!(
                "Storage is {}% full. Export a backup and delete old events now.",
                usage.percentage
            ),
        );
    } else if usage.is_near_full() {
        warning(
            &ui_ctx,
            &format!(
                "Storage is {}% full. Consider exporting a backup.",
                usage.percentage
            ),
        );
    }
    Ok(())
}
