//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI. Errors raised by
//! `chronicle-core` are mapped through [`exit_code_for`].

use std::fmt;

use chronicle_core::{ChronicleError, StorageError};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, store, event, etc.)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput {
        message: String,
        hint: Option<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an InvalidInput error with a hint.
    pub fn invalid_input_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput { .. } => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a storage failure.
pub fn storage_exit_code(err: &StorageError) -> i32 {
    match err {
        StorageError::QuotaExceeded => exit_codes::STORAGE_FULL,
        StorageError::Unavailable => exit_codes::STORAGE_UNAVAILABLE,
        StorageError::InvalidBackupFormat(_) => exit_codes::INVALID_INPUT,
        StorageError::Unknown(_) => exit_codes::GENERAL,
    }
}

/// Exit code for any error bubbling out of a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(storage) = err.downcast_ref::<StorageError>() {
        return storage_exit_code(storage);
    }
    match err.downcast_ref::<ChronicleError>() {
        Some(ChronicleError::Persist(storage)) => storage_exit_code(storage),
        Some(ChronicleError::NotFound(_)) => exit_codes::NOT_FOUND,
        Some(ChronicleError::Validation(_)) | Some(ChronicleError::InvalidInput(_)) => {
            exit_codes::INVALID_INPUT
        }
        _ => exit_codes::GENERAL,
    }
}

/// User guidance attached to an error, if it carries any.
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    let storage = err.downcast_ref::<StorageError>().or_else(|| {
        match err.downcast_ref::<ChronicleError>() {
            Some(ChronicleError::Persist(storage)) => Some(storage),
            _ => None,
        }
    })?;
    match storage {
        StorageError::QuotaExceeded | StorageError::Unavailable => {
            Some(format!("Hint: {}", storage.user_message()))
        }
        StorageError::InvalidBackupFormat(_) => {
            Some("Hint: Pass a file produced by `chronicle export`.".to_string())
        }
        StorageError::Unknown(_) => None,
    }
}
