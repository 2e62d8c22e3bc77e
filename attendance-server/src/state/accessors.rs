use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde::Serialize;

use attendance_core::AttendanceService;
use attendance_types::AppConfig;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct StatusSnapshot {
    pub version: String,
    pub port: u16,
    pub devices_total: usize,
    pub devices_active: usize,
    pub history_len: usize,
    pub auto_sync_interval_minutes: Option<u64>,
    pub uptime_secs: u64,
}

impl AppState {
    pub fn service(&self) -> &Arc<AttendanceService> {
        &self.inner.service
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn bound_port(&self) -> u16 {
        self.inner.bound_port.load(Ordering::Relaxed)
    }

    pub fn set_bound_port(&self, port: u16) {
        self.inner.bound_port.store(port, Ordering::Relaxed);
    }

    pub async fn status(&self) -> StatusSnapshot {
        let service = self.service();
        let devices = service.list_devices().await;
        StatusSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            port: self.bound_port(),
            devices_total: devices.len(),
            devices_active: devices.iter().filter(|d| d.is_active).count(),
            history_len: service.history().len().await,
            auto_sync_interval_minutes: self.inner.config.sync.auto_sync_interval_minutes,
            uptime_secs: self.inner.started_at.elapsed().as_secs(),
        }
    }
}
