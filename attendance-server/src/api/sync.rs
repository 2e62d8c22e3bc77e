//! Reconciliation handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use attendance_types::SyncResult;

use super::error_response;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub async fn sync_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SyncResult>, (StatusCode, String)> {
    state.service().sync_one(&id).await.map(Json).map_err(error_response)
}

pub async fn sync_all_devices(State(state): State<AppState>) -> Json<Vec<SyncResult>> {
    Json(state.service().sync_all().await)
}

pub async fn get_sync_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<SyncResult>> {
    Json(state.service().history().recent(query.limit).await)
}

pub async fn clear_sync_history(State(state): State<AppState>) -> Json<bool> {
    state.service().history().clear().await;
    Json(true)
}
