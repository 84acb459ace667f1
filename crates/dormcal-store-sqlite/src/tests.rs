//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Datelike, NaiveDate, Utc};
use dormcal_core::{
  expand::{ExpansionSummary, create_year, expand_year, year_plan},
  store::CalendarStore,
  year::{CalendarYear, NewYear},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Add a year and apply its full expansion plan. Bypasses the
/// historical-year validation so tests can use fixed years with known ISO
/// shapes.
async fn expanded(s: &SqliteStore, year_number: i32) -> (CalendarYear, ExpansionSummary) {
  let year = s.add_year(NewYear::from_number(year_number)).await.unwrap();
  let summary = expand_year(s, &year).await.unwrap();
  (year, summary)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ─── Years ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_year() {
  let s = store().await;

  let year = s.add_year(NewYear::from_number(2030)).await.unwrap();
  assert_eq!(year.year_number, 2030);
  assert_eq!(year.name, "2030");

  let fetched = s.get_year(2030).await.unwrap().unwrap();
  assert_eq!(fetched.year_id, year.year_id);
  assert_eq!(fetched.name, year.name);
  assert_eq!(fetched.created_at, year.created_at);
}

#[tokio::test]
async fn get_year_missing_returns_none() {
  let s = store().await;
  assert!(s.get_year(2031).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_year_number_rejected() {
  let s = store().await;
  s.add_year(NewYear::from_number(2030)).await.unwrap();

  let err = s
    .add_year(NewYear { name: "other-2030".into(), year_number: 2030 })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::YearExists(2030)));
}

#[tokio::test]
async fn duplicate_year_name_rejected() {
  let s = store().await;
  s.add_year(NewYear { name: "main".into(), year_number: 2030 }).await.unwrap();

  let err = s
    .add_year(NewYear { name: "main".into(), year_number: 2031 })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::YearExists(2031)));
}

#[tokio::test]
async fn list_years_ordered_by_number() {
  let s = store().await;
  s.add_year(NewYear::from_number(2032)).await.unwrap();
  s.add_year(NewYear::from_number(2030)).await.unwrap();
  s.add_year(NewYear::from_number(2031)).await.unwrap();

  let years: Vec<i32> =
    s.list_years().await.unwrap().iter().map(|y| y.year_number).collect();
  assert_eq!(years, [2030, 2031, 2032]);
}

// ─── Expansion ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn expansion_creates_full_leap_year() {
  let s = store().await;
  let (_, summary) = expanded(&s, 2024).await;

  assert_eq!(summary.months_created, 12);
  assert_eq!(summary.days_created, 366);
  assert_eq!(summary.days_existing, 0);
  // 2024 carries weeks 1..=52 plus the corrected trailing week 53 and no
  // week-0 sentinel (it starts on a Monday).
  assert_eq!(summary.weeks_created, 53);

  assert_eq!(s.days_of_year(2024).await.unwrap().len(), 366);
  assert_eq!(s.months_of_year(2024).await.unwrap().len(), 12);
}

#[tokio::test]
async fn expansion_creates_full_common_year() {
  let s = store().await;
  let (_, summary) = expanded(&s, 2025).await;

  assert_eq!(summary.days_created, 365);
  assert_eq!(s.days_of_year(2025).await.unwrap().len(), 365);
}

#[tokio::test]
async fn day_count_matches_calendar_span() {
  // The number of day records equals the span between Dec 31 of the
  // previous year and Dec 31 of the target year.
  let s = store().await;
  for year_number in [2024, 2025, 2026] {
    expanded(&s, year_number).await;
    let span = date(year_number, 12, 31) - date(year_number - 1, 12, 31);
    let days = s.days_of_year(year_number).await.unwrap();
    assert_eq!(days.len() as i64, span.num_days(), "year {year_number}");
  }
}

#[tokio::test]
async fn reapplying_plan_is_a_noop() {
  let s = store().await;
  let (year, first) = expanded(&s, 2024).await;

  let before = s.day_by_date(date(2024, 5, 1)).await.unwrap().unwrap();

  let second = expand_year(&s, &year).await.unwrap();
  assert_eq!(second.months_created, 0);
  assert_eq!(second.weeks_created, 0);
  assert_eq!(second.days_created, 0);
  assert_eq!(second.days_existing, first.days_created);

  // Existing records are untouched, not recreated.
  let after = s.day_by_date(date(2024, 5, 1)).await.unwrap().unwrap();
  assert_eq!(after.day_id, before.day_id);
  assert_eq!(s.days_of_year(2024).await.unwrap().len(), 366);
}

#[tokio::test]
async fn months_and_weeks_are_ordered() {
  let s = store().await;
  expanded(&s, 2027).await;

  let months: Vec<u32> =
    s.months_of_year(2027).await.unwrap().iter().map(|m| m.month_number).collect();
  assert_eq!(months, (1..=12).collect::<Vec<_>>());

  let weeks: Vec<u32> =
    s.weeks_of_year(2027).await.unwrap().iter().map(|w| w.week_number).collect();
  // 2027 opens with the week-0 sentinel (Jan 1–3 belong to ISO 2026-W53)
  // and closes with week 52.
  assert_eq!(weeks.first(), Some(&0));
  assert_eq!(weeks.last(), Some(&52));
  assert!(weeks.windows(2).all(|w| w[0] < w[1]));
}

// ─── Day lookups and traversal ───────────────────────────────────────────────

#[tokio::test]
async fn day_by_date_matches_iso_calendar() {
  let s = store().await;
  expanded(&s, 2024).await;

  let may_first = s.day_by_date(date(2024, 5, 1)).await.unwrap().unwrap();
  assert_eq!(may_first.week_day_number, 3);
  assert_eq!(may_first.date, date(2024, 5, 1));

  assert!(s.day_by_date(date(2031, 5, 1)).await.unwrap().is_none());
}

#[tokio::test]
async fn day_context_traverses_to_week_month_and_year() {
  let s = store().await;
  let (year, _) = expanded(&s, 2024).await;

  let ctx = s.day_context(date(2024, 5, 1)).await.unwrap().unwrap();
  assert_eq!(ctx.day.week_id, ctx.week.week_id);
  assert_eq!(ctx.day.month_id, ctx.month.month_id);
  assert_eq!(ctx.week.year_id, year.year_id);
  assert_eq!(ctx.month.year_id, year.year_id);
  assert_eq!(ctx.year.year_id, year.year_id);

  assert_eq!(ctx.week.week_number, 18);
  assert_eq!(ctx.month.month_number, 5);
  assert_eq!(ctx.year.year_number, 2024);
}

#[tokio::test]
async fn january_first_lands_in_week_zero_or_one() {
  let s = store().await;
  expanded(&s, 2024).await;
  expanded(&s, 2027).await;

  // 2024 starts its own ISO week 1.
  let ctx = s.day_context(date(2024, 1, 1)).await.unwrap().unwrap();
  assert_eq!(ctx.day.week_day_number, 1);
  assert_eq!(ctx.week.week_number, 1);
  assert!(!ctx.week.is_sentinel());

  // Jan 1 2027 is a Friday still inside ISO 2026-W53 — the sentinel.
  let ctx = s.day_context(date(2027, 1, 1)).await.unwrap().unwrap();
  assert_eq!(ctx.day.week_day_number, 5);
  assert_eq!(ctx.week.week_number, 0);
  assert!(ctx.week.is_sentinel());
  assert_eq!(ctx.month.month_number, 1);
}

#[tokio::test]
async fn december_last_attaches_to_final_week() {
  let s = store().await;
  expanded(&s, 2024).await;

  let plan = year_plan(2024);
  let ctx = s.day_context(date(2024, 12, 31)).await.unwrap().unwrap();
  assert_eq!(ctx.day.week_day_number, 2);
  assert_eq!(ctx.week.week_number, plan.last_week);
  assert_eq!(ctx.week.week_number, 53);
  assert_eq!(ctx.month.month_number, 12);
}

#[tokio::test]
async fn expanded_days_match_chrono_weekdays() {
  let s = store().await;
  expanded(&s, 2025).await;

  for day in s.days_of_year(2025).await.unwrap() {
    assert_eq!(
      day.week_day_number,
      day.date.weekday().number_from_monday(),
      "{}",
      day.date
    );
  }
}

// ─── create_year service ─────────────────────────────────────────────────────

#[tokio::test]
async fn create_year_validates_persists_and_expands() {
  let s = store().await;
  let this_year = Utc::now().year();

  let created = create_year(&s, NewYear::from_number(this_year)).await.unwrap();
  assert_eq!(created.year.year_number, this_year);
  assert_eq!(created.expansion.months_created, 12);

  let span = date(this_year, 12, 31) - date(this_year - 1, 12, 31);
  assert_eq!(created.expansion.days_created as i64, span.num_days());
  assert_eq!(
    s.days_of_year(this_year).await.unwrap().len() as i64,
    span.num_days()
  );
}

#[tokio::test]
async fn create_historical_year_writes_nothing() {
  let s = store().await;
  let last_year = Utc::now().year() - 1;

  let err = create_year(&s, NewYear::from_number(last_year)).await.unwrap_err();
  assert!(matches!(
    err,
    dormcal_core::expand::ServiceError::Validation(
      dormcal_core::Error::HistoricalYear { .. }
    )
  ));

  assert!(s.get_year(last_year).await.unwrap().is_none());
  assert!(s.days_of_year(last_year).await.unwrap().is_empty());
  assert!(s.list_years().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_year_twice_fails_on_duplicate() {
  let s = store().await;
  let this_year = Utc::now().year();

  create_year(&s, NewYear::from_number(this_year)).await.unwrap();
  let err = create_year(&s, NewYear::from_number(this_year)).await.unwrap_err();
  assert!(matches!(
    err,
    dormcal_core::expand::ServiceError::Store(Error::YearExists(_))
  ));
}
