//! ISO-8601 expansion of a calendar year into months, weeks and days.
//!
//! Planning is pure: [`year_plan`] computes every `(month, week, day)`
//! record a year should contain without touching any store. Applying the
//! plan is the store's job ([`crate::store::CalendarStore::apply_plan`]),
//! which lets each backend make the whole year atomic.
//!
//! Two year-boundary ambiguities are resolved during planning:
//!
//! - ISO weeks belong to whichever year contains their Thursday, so the
//!   first days of January can still carry the *previous* ISO year's week
//!   52/53. Those days get the sentinel week number 0.
//! - Symmetrically, trailing December days can roll into the *next* ISO
//!   year's week 1. Those days are attached to this year's computed final
//!   week instead.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  store::CalendarStore,
  year::{CalendarYear, NewYear},
};

// ─── Plan types ──────────────────────────────────────────────────────────────

/// One day the expansion will materialise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDay {
  pub month_number:    u32,
  /// Effective week number after boundary correction; 0 is the
  /// early-January sentinel.
  pub week_number:     u32,
  /// ISO weekday, 1 = Monday … 7 = Sunday.
  pub week_day_number: u32,
  pub date:            NaiveDate,
}

/// One month and the days that fall in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMonth {
  pub month_number: u32,
  pub days:         Vec<PlannedDay>,
}

/// The complete expansion of one year: twelve months and every date in
/// them, each date already assigned its effective week number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPlan {
  pub year_number: i32,
  /// The final week number of this year, per [`last_week_of_year`].
  pub last_week:   u32,
  pub months:      Vec<PlannedMonth>,
}

impl YearPlan {
  /// Total number of days across all months (365 or 366).
  pub fn day_count(&self) -> usize {
    self.months.iter().map(|m| m.days.len()).sum()
  }
}

/// What [`CalendarStore::apply_plan`] did: how many records it created and
/// how many already existed. A re-run over fully expanded data reports
/// zero creations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionSummary {
  pub months_created: usize,
  pub weeks_created:  usize,
  pub days_created:   usize,
  pub days_existing:  usize,
}

// ─── Last-week probe ─────────────────────────────────────────────────────────

/// Compute the final week number of `year`.
///
/// Probes backwards from December 31 while the probe date's ISO week is 1,
/// i.e. while it has rolled into the next ISO year. If December 31 itself
/// was not week 1 the probed value stands; otherwise the walk stepped past
/// the rollover and undercounts by the one partial week that belongs to
/// this year, so the answer is the probed value plus one.
pub fn last_week_of_year(year: i32) -> u32 {
  let mut last_week = 1;
  let mut end_day = 31;

  while last_week == 1 {
    // December 26..=31 always exists, and the rollover spans at most
    // Monday..Wednesday, so the probe stays in range.
    let Some(probe) = NaiveDate::from_ymd_opt(year, 12, end_day) else {
      break;
    };
    last_week = probe.iso_week().week();
    end_day -= 1;
  }

  if end_day == 30 { last_week } else { last_week + 1 }
}

// ─── Planning ────────────────────────────────────────────────────────────────

/// Compute the complete `(month, week, day)` expansion for `year_number`.
pub fn year_plan(year_number: i32) -> YearPlan {
  let last_week = last_week_of_year(year_number);
  let mut months = Vec::with_capacity(12);

  for month in 1..=12u32 {
    let mut days = Vec::with_capacity(31);
    for day in 1..=31u32 {
      // An invalid date (April 31, …) ends this month's day loop; dates
      // never become valid again within the same month.
      let Some(date) = NaiveDate::from_ymd_opt(year_number, month, day) else {
        break;
      };

      let iso = date.iso_week();
      let mut week_number = iso.week();

      // Early January: the date may still belong to the previous ISO
      // year's week 52/53. Park it in the week-0 sentinel.
      if month == 1 && iso.year() == year_number - 1 {
        week_number = 0;
      }

      // Trailing December: the date may have rolled into the next ISO
      // year's week 1. Attach it to this year's final week.
      if month == 12 && week_number == 1 {
        week_number = last_week;
      }

      debug_assert!(crate::week::validate_week_number(week_number).is_ok());

      days.push(PlannedDay {
        month_number: month,
        week_number,
        week_day_number: date.weekday().number_from_monday(),
        date,
      });
    }
    months.push(PlannedMonth { month_number: month, days });
  }

  YearPlan { year_number, last_week, months }
}

// ─── Service operations ──────────────────────────────────────────────────────

/// Error from [`create_year`]: validation, or the backing store.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError<E: std::error::Error> {
  #[error(transparent)]
  Validation(#[from] crate::Error),

  #[error("store error: {0}")]
  Store(E),
}

/// Outcome of [`create_year`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedYear {
  pub year:      CalendarYear,
  pub expansion: ExpansionSummary,
}

/// Expand an already-persisted year: plan it and apply the plan through
/// the store. Idempotent — get-or-create semantics make a second run over
/// the same year a no-op.
pub async fn expand_year<S: CalendarStore>(
  store: &S,
  year: &CalendarYear,
) -> Result<ExpansionSummary, S::Error> {
  let plan = year_plan(year.year_number);
  store.apply_plan(year, &plan).await
}

/// Create a calendar year as one explicit operation: validate against the
/// current real-world year, persist the year, then expand it.
///
/// Validation failures surface before anything is written. A store failure
/// during expansion propagates as fatal; the store's `apply_plan` is
/// expected to be atomic, so a failed expansion leaves the year without
/// partial month/week/day data.
pub async fn create_year<S: CalendarStore>(
  store: &S,
  input: NewYear,
) -> Result<CreatedYear, ServiceError<S::Error>> {
  input.validate(Utc::now().year())?;

  let year = store.add_year(input).await.map_err(ServiceError::Store)?;
  let expansion = expand_year(store, &year)
    .await
    .map_err(ServiceError::Store)?;

  Ok(CreatedYear { year, expansion })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
