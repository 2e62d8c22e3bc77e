//! Device registry handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use attendance_types::{Device, DeviceUpdate};

use super::error_response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeviceActionResponse {
    pub success: bool,
    pub device: Device,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub device_id: String,
    pub reachable: bool,
}

pub async fn list_devices(State(state): State<AppState>) -> Json<Vec<Device>> {
    Json(state.service().list_devices().await)
}

pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Device>, (StatusCode, String)> {
    state.service().get_device(&id).await.map(Json).map_err(error_response)
}

pub async fn connect_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeviceActionResponse>, (StatusCode, String)> {
    let service = state.service();
    let success = service.connect(&id).await.map_err(error_response)?;
    let device = service.get_device(&id).await.map_err(error_response)?;
    Ok(Json(DeviceActionResponse { success, device }))
}

pub async fn disconnect_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeviceActionResponse>, (StatusCode, String)> {
    let service = state.service();
    let success = service.disconnect(&id).await.map_err(error_response)?;
    let device = service.get_device(&id).await.map_err(error_response)?;
    Ok(Json(DeviceActionResponse { success, device }))
}

pub async fn configure_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<DeviceUpdate>,
) -> Result<Json<DeviceActionResponse>, (StatusCode, String)> {
    let service = state.service();
    let success = service.configure(&id, update).await.map_err(error_response)?;
    let device = service.get_device(&id).await.map_err(error_response)?;
    Ok(Json(DeviceActionResponse { success, device }))
}

pub async fn test_device(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ConnectionTestResponse> {
    let reachable = state.service().test_connection(&id).await;
    Json(ConnectionTestResponse { device_id: id, reachable })
}
