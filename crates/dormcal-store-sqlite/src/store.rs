//! [`SqliteStore`] — the SQLite implementation of [`CalendarStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use dormcal_core::{
  day::{CalendarDay, DayContext},
  expand::{ExpansionSummary, PlannedDay, YearPlan},
  month::CalendarMonth,
  store::CalendarStore,
  week::CalendarWeek,
  year::{CalendarYear, NewYear},
};

use crate::{
  Error, Result,
  encode::{
    RawDay, RawMonth, RawWeek, RawYear, encode_date, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A dormcal calendar store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// writes funnel through the one connection, so concurrent expansion
/// attempts for the same year serialise on it.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Get-or-create helpers ───────────────────────────────────────────────────
//
// `INSERT OR IGNORE` against the natural uniqueness key, then SELECT the
// surviving row — the existing record always wins, a conflict is never an
// error. All three run inside the `apply_plan` transaction.

fn get_or_create_month(
  tx: &rusqlite::Transaction<'_>,
  year_id: &str,
  month_number: u32,
) -> rusqlite::Result<(String, bool)> {
  let inserted = tx.execute(
    "INSERT OR IGNORE INTO months (month_id, year_id, month_number)
     VALUES (?1, ?2, ?3)",
    rusqlite::params![encode_uuid(Uuid::new_v4()), year_id, month_number],
  )?;
  let month_id: String = tx.query_row(
    "SELECT month_id FROM months WHERE year_id = ?1 AND month_number = ?2",
    rusqlite::params![year_id, month_number],
    |row| row.get(0),
  )?;
  Ok((month_id, inserted == 1))
}

fn get_or_create_week(
  tx: &rusqlite::Transaction<'_>,
  year_id: &str,
  week_number: u32,
) -> rusqlite::Result<(String, bool)> {
  let inserted = tx.execute(
    "INSERT OR IGNORE INTO weeks (week_id, year_id, week_number)
     VALUES (?1, ?2, ?3)",
    rusqlite::params![encode_uuid(Uuid::new_v4()), year_id, week_number],
  )?;
  let week_id: String = tx.query_row(
    "SELECT week_id FROM weeks WHERE year_id = ?1 AND week_number = ?2",
    rusqlite::params![year_id, week_number],
    |row| row.get(0),
  )?;
  Ok((week_id, inserted == 1))
}

fn get_or_create_day(
  tx: &rusqlite::Transaction<'_>,
  week_id: &str,
  month_id: &str,
  day: &PlannedDay,
) -> rusqlite::Result<bool> {
  let inserted = tx.execute(
    "INSERT OR IGNORE INTO days (day_id, week_id, month_id, week_day_number, date)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    rusqlite::params![
      encode_uuid(Uuid::new_v4()),
      week_id,
      month_id,
      day.week_day_number,
      encode_date(day.date),
    ],
  )?;
  Ok(inserted == 1)
}

// ─── CalendarStore impl ──────────────────────────────────────────────────────

impl CalendarStore for SqliteStore {
  type Error = Error;

  // ── Years ─────────────────────────────────────────────────────────────────

  async fn add_year(&self, input: NewYear) -> Result<CalendarYear> {
    let year = CalendarYear {
      year_id:     Uuid::new_v4(),
      name:        input.name,
      year_number: input.year_number,
      created_at:  Utc::now(),
    };

    let id_str      = encode_uuid(year.year_id);
    let name        = year.name.clone();
    let year_number = year.year_number;
    let at_str      = encode_dt(year.created_at);

    let outcome = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO years (year_id, name, year_number, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, year_number, at_str],
        )?;
        Ok(())
      })
      .await;

    match outcome {
      Ok(()) => Ok(year),
      Err(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)))
        if e.code == rusqlite::ErrorCode::ConstraintViolation =>
      {
        Err(Error::YearExists(year.year_number))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn get_year(&self, year_number: i32) -> Result<Option<CalendarYear>> {
    let raw: Option<RawYear> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT year_id, name, year_number, created_at
             FROM years WHERE year_number = ?1",
            rusqlite::params![year_number],
            |row| {
              Ok(RawYear {
                year_id:     row.get(0)?,
                name:        row.get(1)?,
                year_number: row.get(2)?,
                created_at:  row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawYear::into_year).transpose()
  }

  async fn list_years(&self) -> Result<Vec<CalendarYear>> {
    let raws: Vec<RawYear> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT year_id, name, year_number, created_at
           FROM years ORDER BY year_number",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawYear {
              year_id:     row.get(0)?,
              name:        row.get(1)?,
              year_number: row.get(2)?,
              created_at:  row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawYear::into_year).collect()
  }

  // ── Expansion ─────────────────────────────────────────────────────────────

  async fn apply_plan(
    &self,
    year: &CalendarYear,
    plan: &YearPlan,
  ) -> Result<ExpansionSummary> {
    let year_id_str = encode_uuid(year.year_id);
    let plan        = plan.clone();

    let summary = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut summary = ExpansionSummary::default();

        for planned_month in &plan.months {
          let (month_id, month_created) =
            get_or_create_month(&tx, &year_id_str, planned_month.month_number)?;
          if month_created {
            summary.months_created += 1;
          }

          for planned_day in &planned_month.days {
            let (week_id, week_created) =
              get_or_create_week(&tx, &year_id_str, planned_day.week_number)?;
            if week_created {
              summary.weeks_created += 1;
            }

            if get_or_create_day(&tx, &week_id, &month_id, planned_day)? {
              summary.days_created += 1;
            } else {
              summary.days_existing += 1;
            }
          }
        }

        tx.commit()?;
        Ok(summary)
      })
      .await?;

    Ok(summary)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn months_of_year(&self, year_number: i32) -> Result<Vec<CalendarMonth>> {
    let raws: Vec<RawMonth> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT m.month_id, m.year_id, m.month_number
           FROM months m
           JOIN years y ON y.year_id = m.year_id
           WHERE y.year_number = ?1
           ORDER BY m.month_number",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year_number], |row| {
            Ok(RawMonth {
              month_id:     row.get(0)?,
              year_id:      row.get(1)?,
              month_number: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMonth::into_month).collect()
  }

  async fn weeks_of_year(&self, year_number: i32) -> Result<Vec<CalendarWeek>> {
    let raws: Vec<RawWeek> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT w.week_id, w.year_id, w.week_number
           FROM weeks w
           JOIN years y ON y.year_id = w.year_id
           WHERE y.year_number = ?1
           ORDER BY w.week_number",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year_number], |row| {
            Ok(RawWeek {
              week_id:     row.get(0)?,
              year_id:     row.get(1)?,
              week_number: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawWeek::into_week).collect()
  }

  async fn days_of_year(&self, year_number: i32) -> Result<Vec<CalendarDay>> {
    let raws: Vec<RawDay> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT d.day_id, d.week_id, d.month_id, d.week_day_number, d.date
           FROM days d
           JOIN months m ON m.month_id = d.month_id
           JOIN years y  ON y.year_id  = m.year_id
           WHERE y.year_number = ?1
           ORDER BY d.date",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year_number], |row| {
            Ok(RawDay {
              day_id:          row.get(0)?,
              week_id:         row.get(1)?,
              month_id:        row.get(2)?,
              week_day_number: row.get(3)?,
              date:            row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDay::into_day).collect()
  }

  async fn day_by_date(&self, date: NaiveDate) -> Result<Option<CalendarDay>> {
    let date_str = encode_date(date);

    let raw: Option<RawDay> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT day_id, week_id, month_id, week_day_number, date
             FROM days WHERE date = ?1",
            rusqlite::params![date_str],
            |row| {
              Ok(RawDay {
                day_id:          row.get(0)?,
                week_id:         row.get(1)?,
                month_id:        row.get(2)?,
                week_day_number: row.get(3)?,
                date:            row.get(4)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDay::into_day).transpose()
  }

  async fn day_context(&self, date: NaiveDate) -> Result<Option<DayContext>> {
    let date_str = encode_date(date);

    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT d.day_id, d.week_id, d.month_id, d.week_day_number, d.date,
                    w.week_id, w.year_id, w.week_number,
                    m.month_id, m.year_id, m.month_number,
                    y.year_id, y.name, y.year_number, y.created_at
             FROM days d
             JOIN weeks w  ON w.week_id  = d.week_id
             JOIN months m ON m.month_id = d.month_id
             JOIN years y  ON y.year_id  = m.year_id
             WHERE d.date = ?1",
            rusqlite::params![date_str],
            |row| {
              Ok((
                RawDay {
                  day_id:          row.get(0)?,
                  week_id:         row.get(1)?,
                  month_id:        row.get(2)?,
                  week_day_number: row.get(3)?,
                  date:            row.get(4)?,
                },
                RawWeek {
                  week_id:     row.get(5)?,
                  year_id:     row.get(6)?,
                  week_number: row.get(7)?,
                },
                RawMonth {
                  month_id:     row.get(8)?,
                  year_id:      row.get(9)?,
                  month_number: row.get(10)?,
                },
                RawYear {
                  year_id:     row.get(11)?,
                  name:        row.get(12)?,
                  year_number: row.get(13)?,
                  created_at:  row.get(14)?,
                },
              ))
            },
          )
          .optional()?)
      })
      .await?;

    let Some((raw_day, raw_week, raw_month, raw_year)) = raw else {
      return Ok(None);
    };

    Ok(Some(DayContext {
      day:   raw_day.into_day()?,
      week:  raw_week.into_week()?,
      month: raw_month.into_month()?,
      year:  raw_year.into_year()?,
    }))
  }
}
