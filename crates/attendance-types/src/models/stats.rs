//! Daily attendance statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AttendanceStatus, LedgerRow};

/// Totals for one subject kind on one date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct KindStats {
    /// Biometric-sourced rows for the date
    pub total: usize,
    /// Rows with status `present`
    pub present: usize,
    /// `present / total * 100`, `0.0` when there are no rows
    pub percentage: f64,
}

impl KindStats {
    pub fn from_counts(total: usize, present: usize) -> Self {
        let percentage =
            if total == 0 { 0.0 } else { present as f64 / total as f64 * 100.0 };
        Self { total, present, percentage }
    }

    /// Aggregate the biometric-sourced rows out of `rows`.
    pub fn from_rows(rows: &[LedgerRow]) -> Self {
        let (total, present) = rows
            .iter()
            .filter(|row| row.is_biometric())
            .fold((0, 0), |(total, present), row| {
                let is_present = usize::from(row.status == AttendanceStatus::Present);
                (total + 1, present + is_present)
            });
        Self::from_counts(total, present)
    }
}

/// Attendance summary for a single date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub students: KindStats,
    pub teachers: KindStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_total_is_zero_percent() {
        let stats = KindStats::from_counts(0, 0);
        assert_eq!(stats.percentage, 0.0);
        assert!(!stats.percentage.is_nan());
    }

    #[test]
    fn test_percentage() {
        let stats = KindStats::from_counts(4, 3);
        assert!((stats.percentage - 75.0).abs() < f64::EPSILON);
    }
}
