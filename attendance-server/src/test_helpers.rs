//! Test helpers for attendance-server unit tests.

use std::sync::Arc;

use attendance_core::{AttendanceService, InMemoryLedger, MockEventFeed, SimulatedLink};
use attendance_types::AppConfig;

use crate::state::AppState;

/// Create an `AppState` over the default seed devices.
///
/// Uses a zero-delay simulated link, the mock feed and an in-memory ledger.
pub fn test_app_state() -> AppState {
    test_app_state_with(AppConfig::default())
}

pub fn test_app_state_with(config: AppConfig) -> AppState {
    let service = AttendanceService::with_components(
        &config,
        Arc::new(SimulatedLink::instant(config.link.unreachable_device_ids.clone())),
        Arc::new(MockEventFeed::new()),
        Arc::new(InMemoryLedger::new()),
    )
    .expect("failed to create test service");

    AppState::new_with_service(Arc::new(service), config)
}
