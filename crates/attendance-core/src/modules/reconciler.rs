//! Sync Reconciler.
//!
//! Turns raw device events into ledger upserts:
//!
//! 1. resolve the device (unknown → `NotFound`, inactive → `Unavailable`)
//! 2. take the per-device guard (a concurrent sync → `SyncInProgress`)
//! 3. pull the event batch from the feed, newer than the device's feed cursor
//! 4. upsert one ledger row per event, collecting per-event errors
//! 5. advance the cursor, stamp `last_sync` and record the result in history
//!
//! A failing event never aborts the batch. A failing feed yields an
//! unsuccessful result with nothing processed.
//!
//! The feed cursor is the instant the last successful fetch was issued. It is
//! owned here, not derived from `Device::last_sync`, because connect and
//! configure restamp that field without fetching anything. The cursor stays put
//! when the fetch fails or any upsert hits a persistence failure, so the next
//! sync asks for the same window again.

use std::sync::Arc;

use attendance_types::models::BIOMETRIC_REMARK_MARKER;
use attendance_types::{
    AttendanceStatus, Device, DeviceError, EventOutcome, LedgerError, LedgerRow, RawEvent,
    SyncResult,
};
use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::feed::EventFeed;
use super::history::SyncHistory;
use super::ledger::{LedgerStore, UpsertOutcome};
use super::registry::DeviceRegistry;

/// Why a single event did not make it into the ledger.
#[derive(Debug, Error)]
enum EventRejection {
    #[error("capture failed on device")]
    CaptureFailed,

    #[error("event reported by foreign device {0}")]
    ForeignDevice(String),

    #[error("event has no subject id")]
    MissingSubject,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub struct SyncReconciler {
    registry: Arc<DeviceRegistry>,
    feed: Arc<dyn EventFeed>,
    ledger: Arc<dyn LedgerStore>,
    history: Arc<SyncHistory>,
    offset: FixedOffset,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
    cursors: DashMap<String, DateTime<Utc>>,
}

impl SyncReconciler {
    pub fn new(
        registry: Arc<DeviceRegistry>,
        feed: Arc<dyn EventFeed>,
        ledger: Arc<dyn LedgerStore>,
        history: Arc<SyncHistory>,
    ) -> Self {
        Self {
            registry,
            feed,
            ledger,
            history,
            offset: Utc.fix(),
            in_flight: DashMap::new(),
            cursors: DashMap::new(),
        }
    }

    /// Offset used to split event timestamps into attendance date and time.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Watermark the next fetch for `device_id` will send, if any.
    pub fn feed_cursor(&self, device_id: &str) -> Option<DateTime<Utc>> {
        self.cursors.get(device_id).map(|c| *c)
    }

    /// Reconcile one device's event batch into the ledger.
    pub async fn sync_one(&self, device_id: &str) -> Result<SyncResult, DeviceError> {
        let device = self.registry.get(device_id).await?;
        if !device.is_active {
            return Err(DeviceError::Unavailable { id: device.id });
        }

        let lock = self.in_flight.entry(device.id.clone()).or_default().clone();
        let _guard = lock
            .try_lock_owned()
            .map_err(|_| DeviceError::SyncInProgress { id: device.id.clone() })?;

        let mut result = SyncResult::new(&device.id, &device.name);

        let since = self.feed_cursor(&device.id);
        let fetched_at = Utc::now();
        let events = match self.feed.fetch_events(&device, since).await {
            Ok(events) => events,
            Err(err) => {
                warn!("[Sync] {} feed failed: {}", device.id, err);
                result.success = false;
                result.errors.push(err.to_string());
                self.history.record(result.clone()).await;
                return Ok(result);
            },
        };

        debug!("[Sync] {} delivered {} events", device.id, events.len());
        let mut retry_window = false;
        for event in &events {
            result.records_processed += 1;
            match self.reconcile_event(&device, event).await {
                Ok(UpsertOutcome::Inserted) => result.records_added += 1,
                Ok(UpsertOutcome::Updated) => result.records_updated += 1,
                Err(rejection) => {
                    retry_window |= matches!(rejection, EventRejection::Ledger(_));
                    warn!(
                        "[Sync] {} rejected event for {}: {}",
                        device.id, event.subject_id, rejection
                    );
                    result.errors.push(format!("{}: {}", event.subject_id, rejection));
                },
            }
        }

        if retry_window {
            warn!("[Sync] {} keeps its feed cursor after persistence failures", device.id);
        } else {
            self.cursors.insert(device.id.clone(), fetched_at);
        }

        let now = Utc::now();
        self.registry.mark_synced(&device.id, now).await?;
        result.synced_at = now;

        info!(
            "[Sync] {} processed {} (added {}, updated {}, errors {})",
            device.id,
            result.records_processed,
            result.records_added,
            result.records_updated,
            result.errors.len()
        );
        self.history.record(result.clone()).await;
        Ok(result)
    }

    /// Sync every active device, one at a time, in registry order.
    ///
    /// Never fails: a device whose sync errors out is reported as an
    /// unsuccessful result tagged with its display name.
    pub async fn sync_all(&self) -> Vec<SyncResult> {
        let devices = self.registry.active_devices().await;
        let mut results = Vec::with_capacity(devices.len());

        for device in devices {
            let result = match self.sync_one(&device.id).await {
                Ok(result) => result,
                Err(err) => {
                    warn!("[Sync] {} aborted: {}", device.name, err);
                    let message = format!("{}: {err}", device.name);
                    let failed = SyncResult::failed(&device.id, &device.name, message);
                    self.history.record(failed.clone()).await;
                    failed
                },
            };
            results.push(result);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        info!("[Sync] Batch finished: {}/{} devices succeeded", succeeded, results.len());
        results
    }

    async fn reconcile_event(
        &self,
        device: &Device,
        event: &RawEvent,
    ) -> Result<UpsertOutcome, EventRejection> {
        if event.device_id != device.id {
            return Err(EventRejection::ForeignDevice(event.device_id.clone()));
        }
        if event.subject_id.trim().is_empty() {
            return Err(EventRejection::MissingSubject);
        }
        match event.outcome {
            EventOutcome::Failed => return Err(EventRejection::CaptureFailed),
            EventOutcome::Success | EventOutcome::Duplicate => {},
        }

        let local = event.timestamp.with_timezone(&self.offset);
        let time = local.time();
        let row = LedgerRow {
            subject_id: event.subject_id.clone(),
            subject_kind: event.subject_kind,
            attendance_date: local.date_naive(),
            status: AttendanceStatus::Present,
            check_in_time: Some(time.with_nanosecond(0).unwrap_or(time)),
            remarks: Some(format!("{BIOMETRIC_REMARK_MARKER} check-in via {}", device.name)),
        };

        Ok(self.ledger.upsert(row).await?)
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod reconciler_tests;
