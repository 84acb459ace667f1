//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, UUIDs as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, Utc};
use dormcal_core::{
  day::CalendarDay,
  month::CalendarMonth,
  week::CalendarWeek,
  year::CalendarYear,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────
//
// Column values are pulled out of rusqlite rows as plain strings/integers
// inside the connection closure and decoded into domain types outside it.

pub struct RawYear {
  pub year_id:     String,
  pub name:        String,
  pub year_number: i32,
  pub created_at:  String,
}

impl RawYear {
  pub fn into_year(self) -> Result<CalendarYear> {
    Ok(CalendarYear {
      year_id:     decode_uuid(&self.year_id)?,
      name:        self.name,
      year_number: self.year_number,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawMonth {
  pub month_id:     String,
  pub year_id:      String,
  pub month_number: u32,
}

impl RawMonth {
  pub fn into_month(self) -> Result<CalendarMonth> {
    Ok(CalendarMonth {
      month_id:     decode_uuid(&self.month_id)?,
      year_id:      decode_uuid(&self.year_id)?,
      month_number: self.month_number,
    })
  }
}

pub struct RawWeek {
  pub week_id:     String,
  pub year_id:     String,
  pub week_number: u32,
}

impl RawWeek {
  pub fn into_week(self) -> Result<CalendarWeek> {
    Ok(CalendarWeek {
      week_id:     decode_uuid(&self.week_id)?,
      year_id:     decode_uuid(&self.year_id)?,
      week_number: self.week_number,
    })
  }
}

pub struct RawDay {
  pub day_id:          String,
  pub week_id:         String,
  pub month_id:        String,
  pub week_day_number: u32,
  pub date:            String,
}

impl RawDay {
  pub fn into_day(self) -> Result<CalendarDay> {
    Ok(CalendarDay {
      day_id:          decode_uuid(&self.day_id)?,
      week_id:         decode_uuid(&self.week_id)?,
      month_id:        decode_uuid(&self.month_id)?,
      week_day_number: self.week_day_number,
      date:            decode_date(&self.date)?,
    })
  }
}
