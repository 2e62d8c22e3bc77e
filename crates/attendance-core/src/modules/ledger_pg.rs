//! PostgreSQL implementation of the attendance ledger.
//!
//! Students and teachers live in separate tables (`student_attendance`,
//! `teacher_attendance`), each with a `UNIQUE (subject, attendance_date)`
//! constraint. Upserts go through `ON CONFLICT`, so the existence check and the
//! write are one statement.

use std::time::Duration;

use async_trait::async_trait;
use attendance_types::{AttendanceStatus, LedgerError, LedgerRow, SubjectKind};
use chrono::{NaiveDate, NaiveTime};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

use super::ledger::{LedgerResult, LedgerStore, UpsertOutcome};

/// PostgreSQL-backed attendance ledger.
pub struct PostgresLedgerStore {
    /// Database connection pool.
    pool: PgPool,
}

impl PostgresLedgerStore {
    /// Create store with existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to database and create store.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(300))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// Table and subject column for a subject kind.
const fn table_for(kind: SubjectKind) -> (&'static str, &'static str) {
    match kind {
        SubjectKind::Student => ("student_attendance", "student_id"),
        SubjectKind::Teacher => ("teacher_attendance", "teacher_id"),
    }
}

fn map_sqlx_err(err: sqlx::Error) -> LedgerError {
    LedgerError::persistence(err.to_string())
}

fn row_to_ledger(row: &PgRow, kind: SubjectKind) -> LedgerResult<LedgerRow> {
    let status: String = row.try_get("status").map_err(map_sqlx_err)?;
    let status: AttendanceStatus =
        status.parse().map_err(|message| LedgerError::Serialization { message })?;

    Ok(LedgerRow {
        subject_id: row.try_get("subject_id").map_err(map_sqlx_err)?,
        subject_kind: kind,
        attendance_date: row.try_get("attendance_date").map_err(map_sqlx_err)?,
        status,
        check_in_time: row.try_get::<Option<NaiveTime>, _>("check_in_time").map_err(map_sqlx_err)?,
        remarks: row.try_get("remarks").map_err(map_sqlx_err)?,
    })
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn upsert(&self, row: LedgerRow) -> LedgerResult<UpsertOutcome> {
        let (table, column) = table_for(row.subject_kind);
        let sql = format!(
            r#"INSERT INTO {table} (id, {column}, attendance_date, status, check_in_time, remarks)
               VALUES ($1, $2, $3, $4, $5, $6)
               ON CONFLICT ({column}, attendance_date) DO UPDATE SET
                   status = EXCLUDED.status,
                   check_in_time = EXCLUDED.check_in_time,
                   remarks = EXCLUDED.remarks,
                   updated_at = NOW()
               RETURNING (xmax = 0) AS inserted"#
        );

        let result = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&row.subject_id)
            .bind(row.attendance_date)
            .bind(row.status.as_str())
            .bind(row.check_in_time)
            .bind(&row.remarks)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        let inserted: bool = result.try_get("inserted").map_err(map_sqlx_err)?;
        Ok(if inserted { UpsertOutcome::Inserted } else { UpsertOutcome::Updated })
    }

    async fn find(
        &self,
        kind: SubjectKind,
        subject_id: &str,
        date: NaiveDate,
    ) -> LedgerResult<Option<LedgerRow>> {
        let (table, column) = table_for(kind);
        let sql = format!(
            r#"SELECT {column} AS subject_id, attendance_date, status, check_in_time, remarks
               FROM {table} WHERE {column} = $1 AND attendance_date = $2"#
        );

        let row = sqlx::query(&sql)
            .bind(subject_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        row.as_ref().map(|r| row_to_ledger(r, kind)).transpose()
    }

    async fn rows_for_date(
        &self,
        kind: SubjectKind,
        date: NaiveDate,
    ) -> LedgerResult<Vec<LedgerRow>> {
        let (table, column) = table_for(kind);
        let sql = format!(
            r#"SELECT {column} AS subject_id, attendance_date, status, check_in_time, remarks
               FROM {table} WHERE attendance_date = $1 ORDER BY {column}"#
        );

        let rows = sqlx::query(&sql).bind(date).fetch_all(&self.pool).await.map_err(map_sqlx_err)?;
        rows.iter().map(|r| row_to_ledger(r, kind)).collect()
    }
}
