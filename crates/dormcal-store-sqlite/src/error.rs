//! Error type for `dormcal-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] dormcal_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A year with the same `year_number` or `name` already exists.
  #[error("calendar year {0} already exists")]
  YearExists(i32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
