//! CalendarDay and the weekday label table.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{month::CalendarMonth, week::CalendarWeek, year::CalendarYear};

/// Weekday labels as an ordered number → name mapping (ISO: 1 = Monday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayName {
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
  Sunday,
}

impl WeekdayName {
  pub const ALL: [WeekdayName; 7] = [
    Self::Monday,
    Self::Tuesday,
    Self::Wednesday,
    Self::Thursday,
    Self::Friday,
    Self::Saturday,
    Self::Sunday,
  ];

  /// Look up a label by ISO weekday number; `None` outside [1, 7].
  pub fn from_number(n: u32) -> Option<Self> {
    Self::ALL.get(n.checked_sub(1)? as usize).copied()
  }

  /// The ISO weekday number, 1 = Monday … 7 = Sunday.
  pub fn number(self) -> u32 {
    Self::ALL.iter().position(|d| *d == self).unwrap_or(0) as u32 + 1
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Monday => "Monday",
      Self::Tuesday => "Tuesday",
      Self::Wednesday => "Wednesday",
      Self::Thursday => "Thursday",
      Self::Friday => "Friday",
      Self::Saturday => "Saturday",
      Self::Sunday => "Sunday",
    }
  }
}

impl fmt::Display for WeekdayName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// One concrete calendar date, owned by exactly one week and one month
/// (both within the same year).
///
/// Created automatically during expansion, one per date in the year.
/// `(week_id, date)` and `(week_id, week_day_number)` are unique in the
/// store — a week contains each weekday at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
  pub day_id:          Uuid,
  pub week_id:         Uuid,
  pub month_id:        Uuid,
  /// ISO weekday of `date`, 1 = Monday … 7 = Sunday.
  pub week_day_number: u32,
  pub date:            NaiveDate,
}

impl CalendarDay {
  /// The display label for `week_day_number`, if it is in range.
  pub fn weekday_name(&self) -> Option<WeekdayName> {
    WeekdayName::from_number(self.week_day_number)
  }
}

/// A day bundled with its owning week, month and year — the
/// Day → Week → Year and Day → Month → Year traversals in one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayContext {
  pub day:   CalendarDay,
  pub week:  CalendarWeek,
  pub month: CalendarMonth,
  pub year:  CalendarYear,
}
