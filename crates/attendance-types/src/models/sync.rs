//! Per-device reconciliation summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of reconciling one device's event batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncResult {
    pub device_id: String,
    pub device_name: String,
    pub success: bool,
    pub records_processed: usize,
    pub records_added: usize,
    pub records_updated: usize,
    pub errors: Vec<String>,
    pub synced_at: DateTime<Utc>,
}

impl SyncResult {
    /// Empty successful result, filled in while the batch is reconciled.
    pub fn new(device_id: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            device_name: device_name.into(),
            success: true,
            records_processed: 0,
            records_added: 0,
            records_updated: 0,
            errors: Vec::new(),
            synced_at: Utc::now(),
        }
    }

    /// Result for a sync that did not get to reconcile any event.
    pub fn failed(
        device_id: impl Into<String>,
        device_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self { success: false, errors: vec![error.into()], ..Self::new(device_id, device_name) }
    }

    /// `processed == added + updated + errors` for a completed batch.
    pub fn is_consistent(&self) -> bool {
        self.records_processed == self.records_added + self.records_updated + self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_processes_nothing() {
        let result = SyncResult::failed("BIO001", "Main Entrance Scanner", "feed offline");
        assert!(!result.success);
        assert_eq!(result.records_processed, 0);
        assert_eq!(result.errors, vec!["feed offline".to_string()]);
    }

    #[test]
    fn test_consistency() {
        let mut result = SyncResult::new("BIO001", "Main Entrance Scanner");
        result.records_processed = 3;
        result.records_added = 1;
        result.records_updated = 1;
        assert!(!result.is_consistent());

        result.errors.push("STU009: capture failed".to_string());
        assert!(result.is_consistent());
    }
}
