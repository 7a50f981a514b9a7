//! Output formatting for the data commands.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use chronicle_core::category::resolve_category;
use chronicle_core::model::{CategoryItem, Credential, PlanEvent, UserProfile};
use chronicle_core::reminder::reminder_date;
use chronicle_core::usage::{EntityUsage, StorageUsage};

use crate::ui::theme::{category_style, styled, styles};
use crate::ui::{
    kv, mask_secret, print, simple_table, single_line, truncate, Column, OutputMode, UiContext,
};

const NOTES_WIDTH: usize = 40;

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Category name as displayed, colored when known.
fn category_label(ctx: &UiContext, name: &str, categories: &[CategoryItem]) -> String {
    let resolved = resolve_category(name, categories);
    if resolved.is_known() {
        styled(resolved.name(), category_style(resolved.color()), ctx.color)
    } else {
        // Keep the dangling name visible in plain output for scripts.
        match ctx.mode {
            OutputMode::Pretty => styled(resolved.name(), styles::dim(), ctx.color),
            _ => name.to_string(),
        }
    }
}

pub fn print_events(
    ctx: &UiContext,
    events: &[&PlanEvent],
    categories: &[CategoryItem],
) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        return print_json(&serde_json::to_value(events)?);
    }
    if events.is_empty() {
        print(ctx, "No events.");
        return Ok(());
    }
    let columns = [
        Column::new("ID"),
        Column::new("START"),
        Column::new("END"),
        Column::new("TITLE"),
        Column::new("CATEGORY"),
        Column::new("REMINDER"),
        Column::new("NOTES"),
    ];
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            let title = if event.is_journal {
                format!("{} (journal)", event.title)
            } else {
                event.title.clone()
            };
            vec![
                event.id.clone(),
                event.start_date.to_string(),
                event.end_date.to_string(),
                title,
                category_label(ctx, &event.category, categories),
                event.reminder_setting.as_str().to_string(),
                truncate(&single_line(&event.notes), NOTES_WIDTH),
            ]
        })
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
    Ok(())
}

pub fn print_reminders(ctx: &UiContext, events: &[&PlanEvent]) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        let items: Vec<Value> = events
            .iter()
            .map(|event| {
                json!({
                    "id": event.id,
                    "title": event.title,
                    "startDate": event.start_date,
                    "reminderSetting": event.reminder_setting,
                    "reminderDate": reminder_date(event),
                })
            })
            .collect();
        return print_json(&Value::Array(items));
    }
    if events.is_empty() {
        print(ctx, "No reminders due.");
        return Ok(());
    }
    let columns = [
        Column::new("ID"),
        Column::new("TITLE"),
        Column::new("STARTS"),
        Column::new("REMINDER"),
    ];
    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|event| {
            vec![
                event.id.clone(),
                event.title.clone(),
                event.start_date.to_string(),
                event.reminder_setting.as_str().to_string(),
            ]
        })
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
    Ok(())
}

pub fn print_credentials(
    ctx: &UiContext,
    credentials: &[Credential],
    categories: &[CategoryItem],
    show_passwords: bool,
) -> anyhow::Result<()> {
    let password = |c: &Credential| {
        if show_passwords {
            c.password.clone()
        } else {
            mask_secret(&c.password)
        }
    };
    if ctx.mode.is_json() {
        let items: Vec<Value> = credentials
            .iter()
            .map(|c| {
                json!({
                    "id": c.id,
                    "serviceName": c.service_name,
                    "email": c.email,
                    "password": password(c),
                    "category": c.category,
                })
            })
            .collect();
        return print_json(&Value::Array(items));
    }
    if credentials.is_empty() {
        print(ctx, "No credentials.");
        return Ok(());
    }
    let columns = [
        Column::new("ID"),
        Column::new("SERVICE"),
        Column::new("EMAIL"),
        Column::new("PASSWORD"),
        Column::new("CATEGORY"),
    ];
    let rows: Vec<Vec<String>> = credentials
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.service_name.clone(),
                c.email.clone(),
                password(c),
                category_label(ctx, &c.category, categories),
            ]
        })
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
    Ok(())
}

pub fn print_categories(
    ctx: &UiContext,
    categories: &[CategoryItem],
    orphans: &BTreeSet<String>,
) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        return print_json(&json!({
            "categories": categories,
            "orphanedReferences": orphans,
        }));
    }
    let columns = [Column::new("ID"), Column::new("NAME"), Column::new("COLOR")];
    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                styled(&c.name, category_style(&c.color), ctx.color),
                c.color.clone(),
            ]
        })
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
    if !orphans.is_empty() {
        let names: Vec<&str> = orphans.iter().map(String::as_str).collect();
        print(ctx, &kv(ctx, "Uncategorized references", &names.join(", ")));
    }
    Ok(())
}

pub fn print_profile(ctx: &UiContext, profile: &UserProfile) -> anyhow::Result<()> {
    let has_avatar = !profile.avatar_url.is_empty();
    let ai_key = profile.ai_api_key.as_deref().map(mask_secret);
    if ctx.mode.is_json() {
        return print_json(&json!({
            "name": profile.name,
            "role": profile.role,
            "hasAvatar": has_avatar,
            "hasAiApiKey": ai_key.is_some(),
        }));
    }
    print(ctx, &kv(ctx, "Name", &profile.name));
    print(ctx, &kv(ctx, "Role", &profile.role));
    print(ctx, &kv(ctx, "Avatar", if has_avatar { "set" } else { "none" }));
    print(ctx, &kv(ctx, "AI key", ai_key.as_deref().unwrap_or("none")));
    Ok(())
}

pub fn print_usage(
    ctx: &UiContext,
    usage: &StorageUsage,
    entities: &[EntityUsage],
) -> anyhow::Result<()> {
    if ctx.mode.is_json() {
        let breakdown: Vec<Value> = entities
            .iter()
            .map(|e| json!({ "entity": e.entity.backup_name(), "bytes": e.bytes }))
            .collect();
        return print_json(&json!({
            "usedBytes": usage.used_bytes,
            "totalBytes": usage.total_bytes,
            "percentage": usage.percentage,
            "nearFull": usage.is_near_full(),
            "critical": usage.is_critical(),
            "entities": breakdown,
        }));
    }

    let summary = format!(
        "{} of {} ({}%)",
        usage.used_formatted(),
        usage.total_formatted(),
        usage.percentage
    );
    print(ctx, &kv(ctx, "Used", &summary));
    let columns = [Column::new("ENTITY"), Column::new("SIZE")];
    let rows: Vec<Vec<String>> = entities
        .iter()
        .map(|e| vec![e.entity.backup_name().to_string(), e.formatted()])
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
    Ok(())
}
