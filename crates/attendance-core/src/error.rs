//! Unified error types for Attendance Core.

use attendance_types::{ConfigError, DeviceError, LedgerError, TypedError};
use serde::Serialize;
use thiserror::Error;

/// Main error type for infrastructure-facing operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Database operation failed (PostgreSQL).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network request failed (HTTP client).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Domain error from the registry, reconciler, ledger or config layer.
    #[error(transparent)]
    Typed(#[from] TypedError),

    /// Logging could not be initialized.
    #[error("Logger error: {0}")]
    Logger(String),
}

impl From<DeviceError> for AppError {
    fn from(err: DeviceError) -> Self {
        Self::Typed(err.into())
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Typed(err.into())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Typed(err.into())
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for infrastructure operations.
pub type AppResult<T> = Result<T, AppError>;
