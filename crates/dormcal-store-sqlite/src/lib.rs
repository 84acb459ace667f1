//! SQLite backend for the dormcal calendar store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread pool without blocking the async runtime. Per-year expansion is
//! applied inside a single transaction, so a failure midway leaves no
//! partial month/week/day data.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
