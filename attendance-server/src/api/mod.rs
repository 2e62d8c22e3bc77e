//! API Routes
//!
//! REST endpoints for device management, reconciliation and statistics.

mod devices;
mod stats;
mod sync;

#[cfg(test)]
mod router_tests;
#[cfg(test)]
mod sync_tests;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use attendance_types::{DeviceError, LedgerError, TypedError};

use crate::state::{AppState, StatusSnapshot};

pub fn router() -> Router<AppState> {
    Router::new()
        // Status
        .route("/status", get(get_status))
        // Devices
        .route("/devices", get(devices::list_devices))
        .route("/devices/:id", get(devices::get_device).patch(devices::configure_device))
        .route("/devices/:id/connect", post(devices::connect_device))
        .route("/devices/:id/disconnect", post(devices::disconnect_device))
        .route("/devices/:id/test", post(devices::test_device))
        .route("/devices/:id/sync", post(sync::sync_device))
        // Sync
        .route("/sync", post(sync::sync_all_devices))
        .route("/sync/history", get(sync::get_sync_history).delete(sync::clear_sync_history))
        // Stats
        .route("/stats/daily", get(stats::get_daily_stats))
        // API fallback: return 404 for unknown API endpoints
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"})))
}

async fn get_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.status().await)
}

/// Map a domain error to the HTTP status and the message shown to the caller.
pub(crate) fn error_response(err: impl Into<TypedError>) -> (StatusCode, String) {
    let err = err.into();
    let status = match &err {
        TypedError::Device(DeviceError::NotFound { .. }) => StatusCode::NOT_FOUND,
        TypedError::Device(DeviceError::Unavailable { .. } | DeviceError::SyncInProgress { .. }) => {
            StatusCode::CONFLICT
        },
        TypedError::Device(
            DeviceError::ConnectionFailed { .. } | DeviceError::FeedFailed { .. },
        ) => StatusCode::BAD_GATEWAY,
        TypedError::Ledger(_) | TypedError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

pub(crate) fn ledger_error_response(err: LedgerError) -> (StatusCode, String) {
    tracing::error!("[API] Ledger failure: {}", err);
    error_response(err)
}
