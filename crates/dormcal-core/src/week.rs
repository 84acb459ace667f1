//! CalendarWeek — an ISO week scoped to one calendar year.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Largest week number a year can carry: a 53-week ISO year whose trailing
/// days roll into the next year's week 1 gets them back as week 54.
pub const MAX_WEEK_NUMBER: u32 = 54;

/// One week belonging to a [`crate::year::CalendarYear`].
///
/// Created lazily during expansion, the first time a day maps to the
/// `(year, week_number)` pair. `(year_id, week_number)` is unique in the
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarWeek {
  pub week_id:     Uuid,
  pub year_id:     Uuid,
  /// ISO week number within the owning year.
  ///
  /// `0` is a sentinel, not a real ISO week: the first days of January can
  /// still belong to the previous ISO year's week 52/53, and are parked
  /// here so they don't collide with that year's real weeks. Consumers
  /// must treat week 0 as "belongs to no real week of this year".
  pub week_number: u32,
}

impl CalendarWeek {
  /// Whether this is the early-January pre-first-ISO-week sentinel.
  pub fn is_sentinel(&self) -> bool {
    self.week_number == 0
  }
}

/// Range check for week numbers, [0, 54].
pub fn validate_week_number(n: u32) -> Result<()> {
  if n > MAX_WEEK_NUMBER {
    return Err(Error::WeekOutOfRange(n));
  }
  Ok(())
}
