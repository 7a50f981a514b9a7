use chronicle_core::category::resolve_category;
use chronicle_core::model::PlanEvent;

use crate::app::AppContext;
use crate::cli::{EventsAddArgs, EventsListArgs, IdArgs, RemindersArgs};
use crate::errors::CliError;
use crate::helpers::{parse_date, parse_reminder};
use crate::output::{print_events, print_reminders};
use crate::ui::{header, print, receipt, warning};

pub fn handle_list(ctx: &AppContext, args: &EventsListArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let sync = ctx.open()?;
    let mut events: Vec<&PlanEvent> = sync
        .events()
        .iter()
        .filter(|e| !args.journal || e.is_journal)
        .collect();
    events.sort_by_key(|e| e.start_date);

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let context = args.journal.then_some("journal");
        print(&ui_ctx, &header(&ui_ctx, "events", context));
    }
    print_events(&ui_ctx, &events, sync.categories())
}

pub fn handle_add(ctx: &AppContext, args: &EventsAddArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let today = ctx.today();
    let start = parse_date(&args.start, today)?;
    let end = match args.end.as_deref() {
        Some(value) => parse_date(value, today)?,
        None => start,
    };
    let reminder = parse_reminder(&args.reminder)?;
    if args.title.trim().is_empty() {
        return Err(CliError::invalid_input("Event title cannot be empty").into());
    }

    let mut sync = ctx.open()?;
    let category = match args.category.clone() {
        Some(name) => name,
        None => sync
            .categories()
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default(),
    };
    if !resolve_category(&category, sync.categories()).is_known() {
        warning(
            &ui_ctx,
            &format!("Category \"{}\" does not exist; showing as Uncategorized", category),
        );
    }

    let event = PlanEvent::new(args.title.trim(), start, end, category)
        .with_notes(args.notes.clone())
        .with_journal(args.journal)
        .with_reminder(reminder);
    if !event.has_valid_range() {
        return Err(CliError::invalid_input(format!(
            "End date {} is before start date {}",
            end, start
        ))
        .into());
    }
    let id = event.id.clone();
    sync.save_event(event)?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Added event", &[("ID", id.as_str())]),
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let mut sync = ctx.open()?;
    sync.delete_event(&args.id)?;
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Deleted event", &[("ID", args.id.as_str())]),
        );
    }
    Ok(())
}

pub fn handle_dismiss(ctx: &AppContext, args: &IdArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let mut sync = ctx.open()?;
    sync.dismiss_reminder(&args.id)?;
    if !ctx.quiet() {
        print(
            &ui_ctx,
            &receipt(&ui_ctx, "Dismissed reminder", &[("ID", args.id.as_str())]),
        );
    }
    Ok(())
}

pub fn handle_reminders(ctx: &AppContext, args: &RemindersArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let today = ctx.today();
    let on = match args.on.as_deref() {
        Some(value) => parse_date(value, today)?,
        None => today,
    };
    let sync = ctx.open()?;
    let active = sync.active_reminders(on);

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let context = on.to_string();
        print(&ui_ctx, &header(&ui_ctx, "reminders", Some(&context)));
    }
    print_reminders(&ui_ctx, &active)
}
