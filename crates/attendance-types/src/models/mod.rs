//! Core domain models for the attendance service.
//!
//! This module contains all shared data structures used across the workspace.

mod config;
mod device;
mod event;
mod ledger;
mod stats;
mod sync;

// Re-export all models
pub use config::{AppConfig, LinkConfig, LinkMode, ServerConfig, SyncConfig};
pub use device::{default_devices, BiometricType, Device, DeviceUpdate};
pub use event::{EventOutcome, RawEvent, SubjectKind};
pub use ledger::{AttendanceStatus, LedgerRow, BIOMETRIC_REMARK_MARKER};
pub use stats::{DailyStats, KindStats};
pub use sync::SyncResult;
