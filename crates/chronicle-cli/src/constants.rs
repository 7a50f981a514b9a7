//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unclassified failure.
    pub const GENERAL: i32 = 1;

    /// Resource not found (config, store, event, credential, category).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, arguments or backup document.
    pub const INVALID_INPUT: i32 = 4;

    /// The store refused a write because its byte budget is exhausted.
    pub const STORAGE_FULL: i32 = 7;

    /// The store does not accept writes at all.
    pub const STORAGE_UNAVAILABLE: i32 = 8;
}

/// Application name used for config/data directories and headers.
pub const APP_NAME: &str = "chronicle";
