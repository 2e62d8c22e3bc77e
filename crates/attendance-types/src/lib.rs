//! # Attendance Types
//!
//! Core types, models, and error definitions for the school attendance service.
//!
//! This crate provides the foundational type system for the workspace:
//!
//! - **`error`** - Typed error hierarchy for devices, ledger and configuration
//! - **`models`** - Domain models (Device, RawEvent, LedgerRow, SyncResult, DailyStats, AppConfig)
//!
//! ## Architecture Role
//!
//! `attendance-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!              attendance-types (this crate)
//!                        │
//!                        ▼
//!                 attendance-core
//!                        │
//!                        ▼
//!                attendance-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for API/IPC
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, DeviceError, LedgerError, Result, TypedError};

// Re-export core model types
pub use models::{
    AppConfig, AttendanceStatus, BiometricType, DailyStats, Device, DeviceUpdate, EventOutcome,
    KindStats, LedgerRow, RawEvent, SubjectKind, SyncResult,
};
