//! The `CalendarStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `dormcal-store-sqlite`). Higher layers (`dormcal-api`, `dormcal-server`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  day::{CalendarDay, DayContext},
  expand::{ExpansionSummary, YearPlan},
  month::CalendarMonth,
  week::CalendarWeek,
  year::{CalendarYear, NewYear},
};

/// Abstraction over a dormcal calendar store backend.
///
/// Records are immutable once written. The only writes are the creation of
/// a year and the idempotent application of its expansion plan; everything
/// else is a read.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CalendarStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Years ─────────────────────────────────────────────────────────────

  /// Create and persist a new year. The store assigns `year_id` and
  /// `created_at`. A duplicate `year_number` or `name` is an error.
  fn add_year(
    &self,
    input: NewYear,
  ) -> impl Future<Output = Result<CalendarYear, Self::Error>> + Send + '_;

  /// Retrieve a year by its number. Returns `None` if not found.
  fn get_year(
    &self,
    year_number: i32,
  ) -> impl Future<Output = Result<Option<CalendarYear>, Self::Error>> + Send + '_;

  /// List all years, ordered by `year_number`.
  fn list_years(
    &self,
  ) -> impl Future<Output = Result<Vec<CalendarYear>, Self::Error>> + Send + '_;

  // ── Expansion ─────────────────────────────────────────────────────────

  /// Materialise a [`YearPlan`] for an existing year: get-or-create every
  /// month, week and day it names, atomically.
  ///
  /// Records that already exist (by their natural uniqueness keys) are
  /// returned as-is, never duplicated and never modified — re-applying a
  /// plan is a no-op. A storage failure mid-plan must leave no partial
  /// data behind.
  fn apply_plan<'a>(
    &'a self,
    year: &'a CalendarYear,
    plan: &'a YearPlan,
  ) -> impl Future<Output = Result<ExpansionSummary, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All months of the year, ordered by `month_number`.
  fn months_of_year(
    &self,
    year_number: i32,
  ) -> impl Future<Output = Result<Vec<CalendarMonth>, Self::Error>> + Send + '_;

  /// All weeks of the year, ordered by `week_number` (the week-0 sentinel
  /// sorts first when present).
  fn weeks_of_year(
    &self,
    year_number: i32,
  ) -> impl Future<Output = Result<Vec<CalendarWeek>, Self::Error>> + Send + '_;

  /// All days of the year, via their owning month, ordered by date.
  fn days_of_year(
    &self,
    year_number: i32,
  ) -> impl Future<Output = Result<Vec<CalendarDay>, Self::Error>> + Send + '_;

  /// Look up a day by its exact date. Returns `None` if no expanded year
  /// covers the date.
  fn day_by_date(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<CalendarDay>, Self::Error>> + Send + '_;

  /// Look up a day together with its owning week, month and year.
  fn day_context(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<DayContext>, Self::Error>> + Send + '_;
}
