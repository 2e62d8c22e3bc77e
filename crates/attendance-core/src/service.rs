//! Caller-facing attendance service.
//!
//! Bundles the registry, reconciler, ledger and history that one process (or
//! test) owns. Construct it explicitly and share it behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use attendance_types::models::LinkMode;
use attendance_types::{
    AppConfig, ConfigError, DailyStats, Device, DeviceError, DeviceUpdate, LedgerError,
    SyncResult,
};
use chrono::{FixedOffset, NaiveDate};
use tracing::info;

use crate::error::AppResult;
use crate::modules::feed::{EventFeed, HttpEventFeed, MockEventFeed};
use crate::modules::history::SyncHistory;
use crate::modules::ledger::{InMemoryLedger, LedgerStore};
use crate::modules::ledger_pg::PostgresLedgerStore;
use crate::modules::link::{DeviceLink, HttpDeviceLink, SimulatedLink};
use crate::modules::reconciler::SyncReconciler;
use crate::modules::registry::DeviceRegistry;
use crate::modules::stats::compute_daily_stats;

pub struct AttendanceService {
    registry: Arc<DeviceRegistry>,
    reconciler: SyncReconciler,
    ledger: Arc<dyn LedgerStore>,
    history: Arc<SyncHistory>,
    offset: FixedOffset,
}

impl AttendanceService {
    /// Build the service described by `config`.
    ///
    /// Uses PostgreSQL (running migrations) when `database_url` is set and the
    /// in-memory ledger otherwise.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let ledger: Arc<dyn LedgerStore> = match &config.database_url {
            Some(url) => {
                let store = PostgresLedgerStore::connect(url).await?;
                store.run_migrations().await?;
                info!("[Service] Using PostgreSQL ledger");
                Arc::new(store)
            },
            None => {
                info!("[Service] No database configured, using in-memory ledger");
                Arc::new(InMemoryLedger::new())
            },
        };

        let timeout = Duration::from_secs(config.link.connect_timeout_secs);
        let (link, feed): (Arc<dyn DeviceLink>, Arc<dyn EventFeed>) = match config.link.mode {
            LinkMode::Simulated => {
                (Arc::new(SimulatedLink::from_config(&config.link)), Arc::new(MockEventFeed::new()))
            },
            LinkMode::Http => {
                (Arc::new(HttpDeviceLink::new(timeout)?), Arc::new(HttpEventFeed::new(timeout)?))
            },
        };

        Self::with_components(config, link, feed, ledger)
    }

    /// Assemble the service from explicit collaborators.
    pub fn with_components(
        config: &AppConfig,
        link: Arc<dyn DeviceLink>,
        feed: Arc<dyn EventFeed>,
        ledger: Arc<dyn LedgerStore>,
    ) -> AppResult<Self> {
        config.validate()?;
        let offset = FixedOffset::east_opt(config.sync.utc_offset_minutes * 60).ok_or_else(|| {
            ConfigError::ValidationError {
                field: "sync.utc_offset_minutes".to_string(),
                message: "offset out of range".to_string(),
            }
        })?;

        let registry = Arc::new(
            DeviceRegistry::new(config.devices.clone(), link)
                .with_connect_timeout(Duration::from_secs(config.link.connect_timeout_secs)),
        );
        let history = Arc::new(SyncHistory::new(config.sync.history_limit));
        let reconciler =
            SyncReconciler::new(registry.clone(), feed, ledger.clone(), history.clone())
                .with_offset(offset);

        Ok(Self { registry, reconciler, ledger, history, offset })
    }

    pub fn registry(&self) -> &Arc<DeviceRegistry> {
        &self.registry
    }

    pub fn history(&self) -> &Arc<SyncHistory> {
        &self.history
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerStore> {
        &self.ledger
    }

    /// Today's date in the configured attendance offset.
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.offset).date_naive()
    }

    pub async fn list_devices(&self) -> Vec<Device> {
        self.registry.list().await
    }

    pub async fn get_device(&self, id: &str) -> Result<Device, DeviceError> {
        self.registry.get(id).await
    }

    pub async fn connect(&self, id: &str) -> Result<bool, DeviceError> {
        self.registry.connect(id).await
    }

    pub async fn disconnect(&self, id: &str) -> Result<bool, DeviceError> {
        self.registry.disconnect(id).await
    }

    pub async fn configure(&self, id: &str, update: DeviceUpdate) -> Result<bool, DeviceError> {
        self.registry.configure(id, update).await
    }

    pub async fn test_connection(&self, id: &str) -> bool {
        self.registry.test_connection(id).await
    }

    pub async fn sync_one(&self, id: &str) -> Result<SyncResult, DeviceError> {
        self.reconciler.sync_one(id).await
    }

    pub async fn sync_all(&self) -> Vec<SyncResult> {
        self.reconciler.sync_all().await
    }

    pub async fn daily_stats(&self, date: NaiveDate) -> Result<DailyStats, LedgerError> {
        compute_daily_stats(self.ledger.as_ref(), date).await
    }
}
