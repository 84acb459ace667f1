//! Error types for `dormcal-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot add historical year {year_number}: current year is {current_year}")]
  HistoricalYear {
    year_number:  i32,
    current_year: i32,
  },

  #[error("year code name must be a non-empty slug, got {0:?}")]
  InvalidName(String),

  #[error("week number {0} outside [0, 54]")]
  WeekOutOfRange(u32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
