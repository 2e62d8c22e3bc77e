//! Bounded history of sync results.

use std::collections::VecDeque;

use attendance_types::SyncResult;
use tokio::sync::RwLock;

/// Ring buffer of the most recent sync results.
pub struct SyncHistory {
    entries: RwLock<VecDeque<SyncResult>>,
    max_entries: usize,
}

impl SyncHistory {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self { entries: RwLock::new(VecDeque::with_capacity(max_entries)), max_entries }
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub async fn record(&self, result: SyncResult) {
        let mut entries = self.entries.write().await;
        if entries.len() >= self.max_entries {
            let excess = entries.len() - self.max_entries + 1;
            entries.drain(..excess);
        }
        entries.push_back(result);
    }

    /// Newest first.
    pub async fn recent(&self, limit: Option<usize>) -> Vec<SyncResult> {
        let entries = self.entries.read().await;
        let limit = limit.unwrap_or(entries.len());
        entries.iter().rev().take(limit).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for SyncHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(n: usize) -> SyncResult {
        let mut r = SyncResult::new(format!("BIO{n:03}"), "Scanner");
        r.records_processed = n;
        r
    }

    #[tokio::test]
    async fn test_history_evicts_oldest() {
        let history = SyncHistory::new(3);
        for n in 0..5 {
            history.record(result(n)).await;
        }

        assert_eq!(history.len().await, 3);
        let recent = history.recent(None).await;
        let processed: Vec<usize> = recent.iter().map(|r| r.records_processed).collect();
        assert_eq!(processed, vec![4, 3, 2]);
    }

    #[tokio::test]
    async fn test_recent_limit_and_clear() {
        let history = SyncHistory::new(10);
        history.record(result(1)).await;
        history.record(result(2)).await;

        let latest = history.recent(Some(1)).await;
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].records_processed, 2);

        history.clear().await;
        assert!(history.is_empty().await);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(SyncHistory::new(0).capacity(), 1);
    }
}
