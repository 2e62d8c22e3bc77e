//! Typed error definitions for the attendance service.
//!
//! This module provides a structured error hierarchy with specific error types
//! for different domains. All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants
//! - **Composable** via thiserror derive macros

mod config;
mod device;
mod ledger;

pub use config::ConfigError;
pub use device::DeviceError;
pub use ledger::LedgerError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
///
/// Use this when you need a single error type that can represent
/// any attendance-service error.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a device registry or device link error
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Wraps an attendance ledger error
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl TypedError {
    /// Check if this is a temporary error that may resolve on retry.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Device(err) => err.is_transient(),
            Self::Ledger(err) => err.is_transient(),
            Self::Config(_) => false,
        }
    }
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = TypedError::Device(DeviceError::NotFound { id: "BIO404".to_string() });

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Device"));
        assert!(json.contains("BIO404"));

        let deserialized: TypedError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_device_errors_display_verbatim() {
        let err: TypedError = DeviceError::Unavailable { id: "BIO003".to_string() }.into();
        assert_eq!(err.to_string(), "Device BIO003 is not active");
    }

    #[test]
    fn test_transient_classification() {
        let conn: TypedError =
            DeviceError::ConnectionFailed { id: "BIO003".into(), message: "timeout".into() }.into();
        let missing: TypedError = DeviceError::NotFound { id: "x".into() }.into();
        let config: TypedError = ConfigError::ParseError { message: "bad".into() }.into();

        assert!(conn.is_transient());
        assert!(!missing.is_transient());
        assert!(!config.is_transient());
    }
}
