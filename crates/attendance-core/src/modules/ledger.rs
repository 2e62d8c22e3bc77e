//! Attendance ledger storage abstraction.

use std::collections::BTreeMap;

use async_trait::async_trait;
use attendance_types::{LedgerError, LedgerRow, SubjectKind};
use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::RwLock;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// What an upsert did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Persisted attendance ledger keyed by `(subject_kind, subject_id, attendance_date)`.
///
/// `upsert` is a single primitive: implementations must never leave two rows
/// for the same key, even under concurrent writers.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert the row, or overwrite status, check-in time and remarks of the
    /// existing row for the same key.
    async fn upsert(&self, row: LedgerRow) -> LedgerResult<UpsertOutcome>;

    async fn find(
        &self,
        kind: SubjectKind,
        subject_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<LedgerRow>>;

    /// All rows of one subject kind for a date, ordered by subject id.
    async fn rows_for_date(
        &self,
        kind: SubjectKind,
        date: NaiveDate,
    ) -> LedgerResult<Vec<LedgerRow>>;
}

type LedgerKey = (SubjectKind, String, NaiveDate);

/// Process-local ledger used when no database is configured.
#[derive(Default)]
pub struct InMemoryLedger {
    rows: RwLock<BTreeMap<LedgerKey, LedgerRow>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Snapshot of every stored row in key order.
    pub async fn all_rows(&self) -> Vec<LedgerRow> {
        self.rows.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn upsert(&self, row: LedgerRow) -> LedgerResult<UpsertOutcome> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&row.key()) {
            Some(existing) => {
                existing.status = row.status;
                existing.check_in_time = row.check_in_time;
                existing.remarks = row.remarks;
                Ok(UpsertOutcome::Updated)
            },
            None => {
                rows.insert(row.key(), row);
                Ok(UpsertOutcome::Inserted)
            },
        }
    }

    async fn find(
        &self,
        kind: SubjectKind,
        subject_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<LedgerRow>> {
        let key = (kind, subject_id.to_string(), date);
        Ok(self.rows.read().await.get(&key).cloned())
    }

    async fn rows_for_date(
        &self,
        kind: SubjectKind,
        date: NaiveDate,
    ) -> LedgerResult<Vec<LedgerRow>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|row| row.subject_kind == kind && row.attendance_date == date)
            .cloned()
            .collect())
    }
}
