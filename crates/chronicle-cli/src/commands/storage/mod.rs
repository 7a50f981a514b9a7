//! Whole-store commands: usage, export, import and clear.

mod clear;
mod export;
mod import;
mod usage;

pub use clear::handle_clear;
pub use export::handle_export;
pub use import::handle_import;
pub use usage::handle_usage;
