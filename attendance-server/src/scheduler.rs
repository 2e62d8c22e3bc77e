//! Background Schedulers
//!
//! ## Auto Sync Scheduler
//! Runs `sync_all` every `sync.auto_sync_interval_minutes` minutes and logs a
//! per-run summary. Disabled when the interval is unset.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use attendance_core::AttendanceService;
use attendance_types::SyncResult;

use crate::state::AppState;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub devices: usize,
    pub failed: usize,
    pub added: usize,
    pub updated: usize,
    pub errors: usize,
}

impl RunSummary {
    fn from_results(results: &[SyncResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            acc.devices += 1;
            acc.failed += usize::from(!r.success);
            acc.added += r.records_added;
            acc.updated += r.records_updated;
            acc.errors += r.errors.len();
            acc
        })
    }
}

/// One scheduled pass over every active device.
pub async fn run_once(service: &AttendanceService) -> RunSummary {
    let results = service.sync_all().await;
    let summary = RunSummary::from_results(&results);
    if summary.failed > 0 {
        tracing::warn!(
            "[Scheduler] Auto sync: {}/{} devices failed, {} added, {} updated",
            summary.failed,
            summary.devices,
            summary.added,
            summary.updated
        );
    } else {
        tracing::info!(
            "[Scheduler] Auto sync: {} devices, {} added, {} updated, {} event errors",
            summary.devices,
            summary.added,
            summary.updated,
            summary.errors
        );
    }
    summary
}

/// Start the auto sync scheduler as a background tokio task
pub fn start_auto_sync(state: AppState) -> Option<JoinHandle<()>> {
    let minutes = state.config().sync.auto_sync_interval_minutes?;
    let period = Duration::from_secs(minutes.saturating_mul(60));

    Some(tokio::spawn(async move {
        tracing::info!("[Scheduler] Auto Sync Scheduler started (every {}min)", minutes);

        let mut sync_interval = interval(period);
        sync_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; wait a full period before the first run.
        sync_interval.tick().await;

        loop {
            sync_interval.tick().await;
            run_once(state.service()).await;
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{test_app_state, test_app_state_with};
    use attendance_types::AppConfig;

    #[tokio::test]
    async fn test_run_once_summarizes_sync_all() {
        let state = test_app_state();
        let summary = run_once(state.service()).await;
        assert_eq!(summary, RunSummary { devices: 2, failed: 0, added: 6, updated: 0, errors: 0 });

        let summary = run_once(state.service()).await;
        assert_eq!(summary.added, 0);
        assert_eq!(summary.updated, 6);
    }

    #[tokio::test]
    async fn test_scheduler_disabled_without_interval() {
        assert!(start_auto_sync(test_app_state()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_runs_after_one_period() {
        let mut config = AppConfig::default();
        config.sync.auto_sync_interval_minutes = Some(1);
        let state = test_app_state_with(config);

        let handle = start_auto_sync(state.clone()).unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(state.service().history().len().await, 0);

        tokio::time::sleep(Duration::from_secs(45)).await;
        assert_eq!(state.service().history().len().await, 2);
        handle.abort();
    }
}
