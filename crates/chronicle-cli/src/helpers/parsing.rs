//! Parsing helpers for dates, reminders, colors and avatar files.

use std::path::Path;

use chrono::{Days, NaiveDate};

use chronicle_core::category::CATEGORY_COLORS;
use chronicle_core::model::{CategoryItem, ReminderSetting};

use crate::errors::CliError;

/// Parse a calendar date (`YYYY-MM-DD`, `today` or `tomorrow`).
pub fn parse_date(value: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let trimmed = value.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => {
            return today
                .checked_add_days(Days::new(1))
                .ok_or_else(|| CliError::invalid_input("Date out of range").into())
        }
        _ => {}
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid date (expected YYYY-MM-DD, today or tomorrow): {}",
            value
        ))
        .into()
    })
}

pub fn parse_reminder(value: &str) -> anyhow::Result<ReminderSetting> {
    Ok(ReminderSetting::parse(value)?)
}

/// Accept only palette color tokens.
pub fn parse_color(value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if CATEGORY_COLORS.contains(&trimmed) {
        return Ok(trimmed.to_string());
    }
    Err(CliError::invalid_input_with_hint(
        format!("Unknown color: {}", value),
        format!("Hint: Use one of {}", CATEGORY_COLORS.join(", ")),
    )
    .into())
}

/// First palette color no category uses yet, cycling when all are taken.
pub fn next_color(categories: &[CategoryItem]) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|color| !categories.iter().any(|c| c.color == **color))
        .copied()
        .unwrap_or(CATEGORY_COLORS[categories.len() % CATEGORY_COLORS.len()])
}

/// MIME type for an avatar image, from its file extension.
pub fn avatar_mime(path: &Path) -> anyhow::Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(CliError::invalid_input(format!(
            "Unsupported avatar image type: {}",
            path.display()
        ))
        .into()),
    }
}
