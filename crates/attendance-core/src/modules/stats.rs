//! Daily attendance statistics over biometric-sourced ledger rows.

use attendance_types::{DailyStats, KindStats, LedgerError, SubjectKind};
use chrono::NaiveDate;

use super::ledger::LedgerStore;

/// Totals and presence percentage per subject kind for `date`.
///
/// Only rows whose remarks mark them as written by a device sync count.
pub async fn compute_daily_stats(
    ledger: &dyn LedgerStore,
    date: NaiveDate,
) -> Result<DailyStats, LedgerError> {
    let students = ledger.rows_for_date(SubjectKind::Student, date).await?;
    let teachers = ledger.rows_for_date(SubjectKind::Teacher, date).await?;

    Ok(DailyStats {
        date,
        students: KindStats::from_rows(&students),
        teachers: KindStats::from_rows(&teachers),
    })
}
