//! Device registry and device link errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while addressing a biometric device.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum DeviceError {
    /// No device registered under the given id
    #[error("Device not found: {id}")]
    NotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// Device is registered but currently inactive
    #[error("Device {id} is not active")]
    Unavailable {
        /// Identifier of the inactive device
        id: String,
    },

    /// Link handshake with the device failed or timed out
    #[error("Failed to connect to device {id}: {message}")]
    ConnectionFailed {
        /// Identifier of the unreachable device
        id: String,
        /// Details about the link failure
        message: String,
    },

    /// Another sync of the same device is still running
    #[error("Sync already in progress for device {id}")]
    SyncInProgress {
        /// Identifier of the busy device
        id: String,
    },

    /// The device feed could not deliver its event batch
    #[error("Failed to fetch events from device {id}: {message}")]
    FeedFailed {
        /// Identifier of the device whose feed failed
        id: String,
        /// Details about the feed failure
        message: String,
    },
}

impl DeviceError {
    /// Check if this is a temporary error that may resolve on retry.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::SyncInProgress { .. } | Self::FeedFailed { .. }
        )
    }

    /// Identifier of the device this error refers to.
    pub fn device_id(&self) -> &str {
        match self {
            Self::NotFound { id }
            | Self::Unavailable { id }
            | Self::ConnectionFailed { id, .. }
            | Self::SyncInProgress { id }
            | Self::FeedFailed { id, .. } => id,
        }
    }
}
