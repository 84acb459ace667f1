//! SQL schema for the dormcal SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The UNIQUE constraints carry the domain invariants: one month number
/// per year, one week number per year, and within a week each date and
/// each weekday at most once. The expansion relies on them for its
/// get-or-create writes.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS years (
    year_id     TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    year_number INTEGER NOT NULL UNIQUE CHECK (year_number > 0),
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS months (
    month_id     TEXT PRIMARY KEY,
    year_id      TEXT NOT NULL REFERENCES years(year_id),
    month_number INTEGER NOT NULL CHECK (month_number BETWEEN 1 AND 12),
    UNIQUE (year_id, month_number)
);

-- week_number 0 is the early-January sentinel; 54 is reachable when a
-- 53-week ISO year also has trailing days rolled in from next year's W1.
CREATE TABLE IF NOT EXISTS weeks (
    week_id     TEXT PRIMARY KEY,
    year_id     TEXT NOT NULL REFERENCES years(year_id),
    week_number INTEGER NOT NULL CHECK (week_number BETWEEN 0 AND 54),
    UNIQUE (year_id, week_number)
);

CREATE TABLE IF NOT EXISTS days (
    day_id          TEXT PRIMARY KEY,
    week_id         TEXT NOT NULL REFERENCES weeks(week_id),
    month_id        TEXT NOT NULL REFERENCES months(month_id),
    week_day_number INTEGER NOT NULL CHECK (week_day_number BETWEEN 1 AND 7),
    date            TEXT NOT NULL,   -- ISO 8601 calendar date
    UNIQUE (week_id, date),
    UNIQUE (week_id, week_day_number)
);

CREATE INDEX IF NOT EXISTS days_date_idx   ON days(date);
CREATE INDEX IF NOT EXISTS days_month_idx  ON days(month_id);
CREATE INDEX IF NOT EXISTS weeks_year_idx  ON weeks(year_id);
CREATE INDEX IF NOT EXISTS months_year_idx ON months(year_id);

PRAGMA user_version = 1;
";
