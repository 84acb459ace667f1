//! Handlers for `/years` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/years` | All years, ordered by number |
//! | `POST` | `/years` | Body: `{"year_number":2026,"name":"2026"}`; name defaults to the number |
//! | `GET`  | `/years/:number` | 404 if not found |
//! | `GET`  | `/years/:number/months` | Months of the year |
//! | `GET`  | `/years/:number/weeks` | Weeks of the year |
//! | `GET`  | `/years/:number/days` | Days of the year |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use dormcal_core::{
  day::CalendarDay,
  expand::{CreatedYear, ServiceError, create_year},
  month::CalendarMonth,
  store::CalendarStore,
  week::CalendarWeek,
  year::{CalendarYear, NewYear},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub year_number: i32,
  /// Code name; defaults to the year number rendered as a string.
  pub name:        Option<String>,
}

/// `POST /years` — validate, persist and expand a year as one operation.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = match body.name {
    Some(name) => NewYear { name, year_number: body.year_number },
    None => NewYear::from_number(body.year_number),
  };

  // The store rejects duplicates too, but it reports them as a generic
  // store error; checking here keeps the 409 mapping backend-agnostic.
  let existing = store
    .get_year(input.year_number)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.is_some() {
    return Err(ApiError::Conflict(format!(
      "calendar year {} already exists",
      input.year_number
    )));
  }

  let created: CreatedYear = create_year(store.as_ref(), input)
    .await
    .map_err(|e| match e {
      ServiceError::Validation(v) => ApiError::BadRequest(v.to_string()),
      ServiceError::Store(s) => ApiError::Store(Box::new(s)),
    })?;

  tracing::info!(
    year = created.year.year_number,
    months = created.expansion.months_created,
    weeks = created.expansion.weeks_created,
    days = created.expansion.days_created,
    "expanded calendar year"
  );

  Ok((StatusCode::CREATED, Json(created)))
}

// ─── List / get ───────────────────────────────────────────────────────────────

/// `GET /years`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CalendarYear>>, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let years = store
    .list_years()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(years))
}

/// `GET /years/:number`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(number): Path<i32>,
) -> Result<Json<CalendarYear>, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let year = fetch_year(store.as_ref(), number).await?;
  Ok(Json(year))
}

// ─── Sub-resources ────────────────────────────────────────────────────────────

/// `GET /years/:number/months`
pub async fn months<S>(
  State(store): State<Arc<S>>,
  Path(number): Path<i32>,
) -> Result<Json<Vec<CalendarMonth>>, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  fetch_year(store.as_ref(), number).await?;
  let months = store
    .months_of_year(number)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(months))
}

/// `GET /years/:number/weeks`
pub async fn weeks<S>(
  State(store): State<Arc<S>>,
  Path(number): Path<i32>,
) -> Result<Json<Vec<CalendarWeek>>, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  fetch_year(store.as_ref(), number).await?;
  let weeks = store
    .weeks_of_year(number)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(weeks))
}

/// `GET /years/:number/days`
pub async fn days<S>(
  State(store): State<Arc<S>>,
  Path(number): Path<i32>,
) -> Result<Json<Vec<CalendarDay>>, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  fetch_year(store.as_ref(), number).await?;
  let days = store
    .days_of_year(number)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(days))
}

async fn fetch_year<S>(store: &S, number: i32) -> Result<CalendarYear, ApiError>
where
  S: CalendarStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_year(number)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("calendar year {number} not found")))
}
