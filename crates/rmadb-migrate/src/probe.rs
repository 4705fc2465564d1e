//! Read-only schema introspection.
//!
//! Every structural change is gated on one of these probes, which is what
//! makes the engine safe to invoke against a database that is already
//! partially or fully migrated. A table that does not exist is an expected
//! outcome here, never an error.

use rusqlite::{Connection, OptionalExtension as _};

use crate::Result;

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
  let found = conn
    .query_row(
      "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
      rusqlite::params![table],
      |_| Ok(()),
    )
    .optional()?;
  Ok(found.is_some())
}

/// Reports `false` for a missing table rather than erroring:
/// `pragma_table_info` simply yields no rows for it.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
  let count: i64 = conn.query_row(
    "SELECT count(*) FROM pragma_table_info(?1) WHERE name = ?2",
    rusqlite::params![table, column],
    |row| row.get(0),
  )?;
  Ok(count > 0)
}
