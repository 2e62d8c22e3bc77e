//! Persisted attendance ledger rows.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::SubjectKind;

/// Remarks containing this marker identify rows written by device sync.
pub const BIOMETRIC_REMARK_MARKER: &str = "Biometric";

/// Attendance status stored in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
            Self::Excused => "excused",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            "excused" => Ok(Self::Excused),
            other => Err(format!("unknown attendance status: {other}")),
        }
    }
}

/// Attendance record for one subject on one date.
///
/// The ledger holds at most one row per `(subject_kind, subject_id, attendance_date)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerRow {
    pub subject_id: String,
    pub subject_kind: SubjectKind,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
    pub remarks: Option<String>,
}

impl LedgerRow {
    /// Whether this row was produced by a biometric device sync.
    pub fn is_biometric(&self) -> bool {
        self.remarks.as_deref().is_some_and(|r| r.contains(BIOMETRIC_REMARK_MARKER))
    }

    pub fn key(&self) -> (SubjectKind, String, NaiveDate) {
        (self.subject_kind, self.subject_id.clone(), self.attendance_date)
    }
}
