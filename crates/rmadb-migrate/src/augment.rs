//! Structural augmenter: idempotent `ALTER TABLE … ADD COLUMN`.

use rusqlite::Connection;

use crate::{Result, probe::column_exists};

/// Ensure `column` exists on `table` with the given type/default declaration.
/// Returns whether the column was added by this call.
///
/// The probe handles the common already-applied case up front; a concurrent
/// duplicate is still classified benign by inspecting the failure, so the
/// augmenter stays correct even without the probe. Any other structural
/// failure propagates and aborts the run.
pub fn ensure_column(
  conn:   &Connection,
  table:  &str,
  column: &str,
  decl:   &str,
) -> Result<bool> {
  if column_exists(conn, table, column)? {
    tracing::debug!(table, column, "column already present, skipping");
    return Ok(false);
  }

  // Table and column names cannot be bound as parameters.
  let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
  match conn.execute(&sql, []) {
    Ok(_) => {
      tracing::info!(table, column, "added column");
      Ok(true)
    }
    Err(err) if is_duplicate_column(&err) => {
      tracing::debug!(table, column, %err, "duplicate column reported, treating as applied");
      Ok(false)
    }
    Err(err) => Err(err.into()),
  }
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("duplicate column name")
  )
}
