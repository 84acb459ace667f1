//! CalendarMonth and the month-name label table.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Month labels as an ordered number → name mapping (1 = January).
///
/// A plain lookup table, not behaviour inherited from the records that use
/// it; the `month_number` column stores the number, labels are resolved on
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthName {
  January,
  February,
  March,
  April,
  May,
  June,
  July,
  August,
  September,
  October,
  November,
  December,
}

impl MonthName {
  pub const ALL: [MonthName; 12] = [
    Self::January,
    Self::February,
    Self::March,
    Self::April,
    Self::May,
    Self::June,
    Self::July,
    Self::August,
    Self::September,
    Self::October,
    Self::November,
    Self::December,
  ];

  /// Look up a label by month number; `None` outside [1, 12].
  pub fn from_number(n: u32) -> Option<Self> {
    Self::ALL.get(n.checked_sub(1)? as usize).copied()
  }

  /// The month number stored in the database, 1-based.
  pub fn number(self) -> u32 {
    Self::ALL.iter().position(|m| *m == self).unwrap_or(0) as u32 + 1
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::January => "January",
      Self::February => "February",
      Self::March => "March",
      Self::April => "April",
      Self::May => "May",
      Self::June => "June",
      Self::July => "July",
      Self::August => "August",
      Self::September => "September",
      Self::October => "October",
      Self::November => "November",
      Self::December => "December",
    }
  }
}

impl fmt::Display for MonthName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// One month belonging to a [`crate::year::CalendarYear`].
///
/// Created automatically during expansion, one per month per year.
/// `(year_id, month_number)` is unique in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarMonth {
  pub month_id:     Uuid,
  pub year_id:      Uuid,
  /// 1 = January … 12 = December.
  pub month_number: u32,
}

impl CalendarMonth {
  /// The display label for `month_number`, if it is in range.
  pub fn name(&self) -> Option<MonthName> {
    MonthName::from_number(self.month_number)
  }
}
