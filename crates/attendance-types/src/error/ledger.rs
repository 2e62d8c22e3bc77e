//! Attendance ledger errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a ledger store.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum LedgerError {
    /// Read or write against the backing store failed
    #[error("Persistence failure: {message}")]
    PersistenceFailure {
        /// Description of the storage failure
        message: String,
    },

    /// A stored value could not be decoded
    #[error("Ledger serialization error: {message}")]
    Serialization {
        /// Description of the decoding failure
        message: String,
    },
}

impl LedgerError {
    /// Shorthand for a persistence failure with the given message.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::PersistenceFailure { message: message.into() }
    }

    /// Check if this is a temporary error that may resolve on retry.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::PersistenceFailure { .. })
    }
}
