use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::devices::disconnect_device;
use super::sync::{
    clear_sync_history, get_sync_history, sync_all_devices, sync_device, HistoryQuery,
};
use crate::test_helpers::test_app_state;

#[tokio::test]
async fn test_sync_all_returns_one_result_per_active_device() {
    let state = test_app_state();
    let Json(results) = sync_all_devices(State(state)).await;

    let ids: Vec<_> = results.iter().map(|r| r.device_id.as_str()).collect();
    assert_eq!(ids, ["BIO001", "BIO002"]);
    assert!(results.iter().all(|r| r.success && r.records_added == 3));
}

#[tokio::test]
async fn test_sync_inactive_device_is_conflict() {
    let state = test_app_state();
    let (status, _) =
        sync_device(State(state.clone()), Path("BIO003".to_string())).await.unwrap_err();
    assert_eq!(status, StatusCode::CONFLICT);

    disconnect_device(State(state.clone()), Path("BIO001".to_string())).await.unwrap();
    let (status, message) =
        sync_device(State(state), Path("BIO001".to_string())).await.unwrap_err();
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message, "Device BIO001 is not active");
}

#[tokio::test]
async fn test_second_sync_updates_rows() {
    let state = test_app_state();
    sync_device(State(state.clone()), Path("BIO001".to_string())).await.unwrap();

    let Json(again) = sync_device(State(state), Path("BIO001".to_string())).await.unwrap();
    assert_eq!(again.records_added, 0);
    assert_eq!(again.records_updated, 3);
}

#[tokio::test]
async fn test_history_newest_first_and_clear() {
    let state = test_app_state();
    sync_device(State(state.clone()), Path("BIO001".to_string())).await.unwrap();
    sync_device(State(state.clone()), Path("BIO002".to_string())).await.unwrap();

    let Json(history) =
        get_sync_history(State(state.clone()), Query(HistoryQuery { limit: Some(1) })).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].device_id, "BIO002");

    let Json(cleared) = clear_sync_history(State(state.clone())).await;
    assert!(cleared);
    let Json(history) = get_sync_history(State(state), Query(HistoryQuery { limit: None })).await;
    assert!(history.is_empty());
}
