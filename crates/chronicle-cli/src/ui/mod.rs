//! UI primitives for the Chronicle CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens and styling via `owo-colors`
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String utilities (truncate, mask)

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;

pub use render::{header, kv, print, print_error, receipt, simple_table, warning, Column};

pub use format::{mask_secret, single_line, truncate};
