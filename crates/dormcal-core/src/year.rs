//! CalendarYear — the root of the calendar hierarchy.
//!
//! A year is created explicitly by an operator and is immutable thereafter.
//! Creating one triggers the expansion of all of its months, weeks and days
//! (see [`crate::expand`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// One calendar year known to the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarYear {
  pub year_id:     Uuid,
  /// Unique short code name, e.g. `"2026"` or `"2026-main"`.
  pub name:        String,
  pub year_number: i32,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::CalendarStore::add_year`].
/// `year_id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewYear {
  pub name:        String,
  pub year_number: i32,
}

impl NewYear {
  /// Build an input whose code name is the year number itself.
  pub fn from_number(year_number: i32) -> Self {
    Self { name: year_number.to_string(), year_number }
  }

  /// Reject historical years and malformed code names.
  ///
  /// `current_year` is supplied by the caller so the check stays a pure
  /// function; the service layer passes the real-world year.
  pub fn validate(&self, current_year: i32) -> Result<()> {
    if self.year_number < current_year {
      return Err(Error::HistoricalYear {
        year_number: self.year_number,
        current_year,
      });
    }
    if self.name.is_empty()
      || !self
        .name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
      return Err(Error::InvalidName(self.name.clone()));
    }
    Ok(())
  }
}
