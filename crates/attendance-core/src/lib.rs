//! # Attendance Core
//!
//! Core business logic for the school attendance service.
//!
//! ## Architecture
//!
//! ```text
//! attendance-core/src/modules/
//! ├── registry.rs    # Device Registry (owns devices + injected DeviceLink)
//! ├── link.rs        # DeviceLink trait: SimulatedLink, HttpDeviceLink
//! ├── feed.rs        # EventFeed trait: MockEventFeed, HttpEventFeed
//! ├── ledger.rs      # LedgerStore trait + InMemoryLedger
//! ├── ledger_pg.rs   # PostgreSQL LedgerStore (ON CONFLICT upsert)
//! ├── reconciler.rs  # Sync Reconciler (sync_one / sync_all)
//! ├── stats.rs       # Daily statistics aggregation
//! ├── history.rs     # Bounded sync result history
//! ├── config.rs      # config.json persistence
//! └── logger.rs      # tracing subscriber setup
//! ```
//!
//! [`AttendanceService`] wires these together for a process or request scope;
//! nothing in this crate lives in process-wide state.

#![allow(
    clippy::significant_drop_tightening,
    reason = "RwLock guards in async code require careful lifetime management"
)]
#![cfg_attr(test, allow(clippy::panic, clippy::float_cmp, clippy::unwrap_used))]

pub mod error;
pub mod modules;
pub mod service;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use modules::feed::{EventFeed, HttpEventFeed, MockEventFeed};
pub use modules::history::SyncHistory;
pub use modules::ledger::{InMemoryLedger, LedgerStore, UpsertOutcome};
pub use modules::ledger_pg::PostgresLedgerStore;
pub use modules::link::{DeviceLink, HttpDeviceLink, SimulatedLink};
pub use modules::reconciler::SyncReconciler;
pub use modules::registry::DeviceRegistry;
pub use modules::stats::compute_daily_stats;
pub use service::AttendanceService;
