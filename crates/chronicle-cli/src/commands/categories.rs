use chronicle_core::category::orphaned_references;
use chronicle_core::model::CategoryItem;

use crate::app::{AppContext, Chronicle};
use crate::cli::{CategoriesAddArgs, CategoriesListArgs, CategoriesUpdateArgs, NameArgs};
use crate::errors::CliError;
use crate::helpers::{next_color, parse_color};
use crate::output::print_categories;
use crate::ui::{header, print, receipt, warning};

fn find_by_name(sync: &Chronicle, name: &str) -> anyhow::Result<CategoryItem> {
    sync.categories()
        .iter()
        .find(|c| c.name == name.trim())
        .cloned()
        .ok_or_else(|| {
            CliError::not_found(
                format!("Category \"{}\" not found", name),
                "Hint: Run `chronicle categories list` to see categories.",
            )
            .into()
        })
}

pub fn handle_list(ctx: &AppContext, args: &CategoriesListArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let sync = ctx.open()?;
    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "categories", None));
    }
    let orphans = orphaned_references(sync.state());
    print_categories(&ui_ctx, sync.categories(), &orphans)
}

pub fn handle_add(ctx: &AppContext, args: &CategoriesAddArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let mut sync = ctx.open()?;
    let color = match args.color.as_deref() {
        Some(value) => parse_color(value)?,
        None => next_color(sync.categories()).to_string(),
    };
    let item = sync.add_category(&args.name, &color)?;
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Added category",
                &[("Name", item.name.as_str()), ("Color", item.color.as_str())],
            ),
        );
    }
    Ok(())
}

pub fn handle_update(ctx: &AppContext, args: &CategoriesUpdateArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    if args.rename.is_none() && args.color.is_none() {
        return Err(CliError::invalid_input_with_hint(
            "Nothing to update",
            "Hint: Pass --rename and/or --color.",
        )
        .into());
    }
    let mut sync = ctx.open()?;
    let mut item = find_by_name(&sync, &args.name)?;
    let old_name = item.name.clone();
    if let Some(name) = args.rename.as_deref() {
        item.name = name.to_string();
    }
    if let Some(color) = args.color.as_deref() {
        item.color = parse_color(color)?;
    }
    sync.update_category(item)?;

    if args.rename.is_some() && orphaned_references(sync.state()).contains(&old_name) {
        warning(
            &ui_ctx,
            &format!(
                "Items filed under \"{}\" keep the old name and show as Uncategorized",
                old_name
            ),
        );
    }
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Updated category", &[("Name", old_name.as_str())]),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &NameArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let mut sync = ctx.open()?;
    let item = find_by_name(&sync, &args.name)?;
    sync.delete_category(&item.id)?;

    if orphaned_references(sync.state()).contains(&item.name) {
        warning(
            &ui_ctx,
            &format!(
                "Items filed under \"{}\" now show as Uncategorized",
                item.name
            ),
        );
    }
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Deleted category", &[("Name", item.name.as_str())]),
        );
    }
    Ok(())
}
