//! Input parsing helpers for the CLI.

mod parsing;

pub use parsing::{avatar_mime, next_color, parse_color, parse_date, parse_reminder};
