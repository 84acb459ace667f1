//! Handler for `GET /days/:date`.
//!
//! The date is an ISO `YYYY-MM-DD` path segment. The response is the full
//! traversal for the day — its week, month and year — plus the display
//! labels resolved from the number → name tables.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use dormcal_core::{
  day::{DayContext, WeekdayName},
  month::MonthName,
  store::CalendarStore,
};
use serde::Serialize;

use crate::error::ApiError;

/// A [`DayContext`] with the weekday and month labels attached.
#[derive(Debug, Serialize)]
pub struct DayResponse {
  #[serde(flatten)]
  pub context:    DayContext,
  pub weekday:    Option<WeekdayName>,
  pub month_name: Option<MonthName>,
}

/// `GET /days/:date`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(date): Path<NaiveDate>,
) -> Result<Json<DayResponse>, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let context = store
    .day_context(date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("no calendar day for {date}")))?;

  let weekday = context.day.weekday_name();
  let month_name = context.month.name();

  Ok(Json(DayResponse { context, weekday, month_name }))
}
