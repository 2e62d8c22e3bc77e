//! Application State
//!
//! Holds the attendance service and the configuration the server was started with.

mod accessors;

pub use accessors::StatusSnapshot;

use anyhow::Result;
use std::sync::atomic::AtomicU16;
use std::sync::Arc;
use std::time::Instant;

use attendance_core::AttendanceService;
use attendance_types::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub service: Arc<AttendanceService>,
    pub config: AppConfig,
    pub bound_port: AtomicU16,
    pub started_at: Instant,
}

impl AppState {
    /// Build the service described by `config` (connects to PostgreSQL when configured).
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let service = AttendanceService::from_config(&config).await?;
        Ok(Self::new_with_service(Arc::new(service), config))
    }

    /// Create AppState around an already assembled service
    pub fn new_with_service(service: Arc<AttendanceService>, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service,
                config,
                bound_port: AtomicU16::new(0),
                started_at: Instant::now(),
            }),
        }
    }
}
