//! Attendance statistics handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use attendance_types::DailyStats;

use super::ledger_error_response;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatsQuery {
    /// `YYYY-MM-DD`; today in the configured offset when absent
    pub date: Option<NaiveDate>,
}

pub async fn get_daily_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<DailyStats>, (StatusCode, String)> {
    let service = state.service();
    let date = query.date.unwrap_or_else(|| service.today());
    service.daily_stats(date).await.map(Json).map_err(ledger_error_response)
}
