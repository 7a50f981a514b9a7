//! Error types for Chronicle core operations.
//!
//! Two layers live here:
//! - [`StorageError`]: the persistence taxonomy returned by every save,
//!   import and synchronizer write.
//! - [`ChronicleError`]: domain errors for validation and lookups. The CLI
//!   layer maps these to user-friendly messages and exit codes.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Chronicle operations.
pub type Result<T> = std::result::Result<T, ChronicleError>;

/// Core error type for Chronicle domain operations.
#[derive(Debug, Error)]
pub enum ChronicleError {
    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (opening or reading the backing store)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A write through the storage accessor failed
    #[error(transparent)]
    Persist(#[from] StorageError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for ChronicleError {
    fn from(err: std::io::Error) -> Self {
        ChronicleError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ChronicleError {
    fn from(err: serde_json::Error) -> Self {
        ChronicleError::Validation(err.to_string())
    }
}

/// Failure of a write through the storage accessor or the backup codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store does not accept writes at all.
    #[error("Local storage is not available.")]
    Unavailable,

    /// The backing store rejected the write because its byte budget is exhausted.
    #[error("Storage is full.")]
    QuotaExceeded,

    /// Any other write failure (serialization, unexpected store error).
    #[error("Failed to save data: {0}")]
    Unknown(String),

    /// Import input is not a parseable backup document.
    #[error("Invalid backup file format: {0}")]
    InvalidBackupFormat(String),
}

/// Wire-level classification of a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageErrorKind {
    StorageUnavailable,
    QuotaExceeded,
    Unknown,
}

impl StorageError {
    /// Collapse the error onto the three-valued storage taxonomy.
    ///
    /// Backup format errors report as `Unknown`, matching the result shape
    /// consumers of exported files already expect.
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::Unavailable => StorageErrorKind::StorageUnavailable,
            StorageError::QuotaExceeded => StorageErrorKind::QuotaExceeded,
            StorageError::Unknown(_) | StorageError::InvalidBackupFormat(_) => {
                StorageErrorKind::Unknown
            }
        }
    }

    /// User-facing guidance for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Unavailable => "Local storage is not available on this system.",
            StorageError::QuotaExceeded => {
                "Storage is full. Please delete some old events or clear data to free up space, and export a backup first."
            }
            StorageError::Unknown(_) => "Failed to save data. Please try again.",
            StorageError::InvalidBackupFormat(_) => "Invalid backup file format.",
        }
    }
}
