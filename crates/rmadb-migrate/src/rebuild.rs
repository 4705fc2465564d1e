//! Dependent-table rebuilder: move owner references into user-space.
//!
//! SQLite cannot retype a column or retarget a foreign key in place, so the
//! join tables go through a copy-rename rebuild: create a shadow table with
//! the new schema, populate it by joining through `internal_owners` to
//! `users` on email, then swap it in under the original name. The flat
//! foreign key on `rmas` only needs an in-place `UPDATE` from the resolved
//! mapping.
//!
//! The email join applies the same resolution rule as the identity
//! resolver, so a rebuild run as a separate pass stays correct. Both passes
//! run inside one uninterrupted transaction, which is what guarantees they
//! agree; the row-count check below asserts that instead of trusting it.

use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::{
  Result,
  probe::{column_exists, table_exists},
};

/// Rewrite `rmas.AssignedToUserID` from the resolved mapping, keyed by the
/// old `InternalOwnerID` column. Rows with no owner reference keep a null
/// assignment. Returns the number of rows rewritten.
pub fn rebuild_assignments(
  conn:    &Connection,
  mapping: &BTreeMap<i64, i64>,
) -> Result<usize> {
  if !column_exists(conn, "rmas", "InternalOwnerID")? {
    tracing::info!("rmas carries no legacy owner column, nothing to rewrite");
    return Ok(0);
  }

  let mut updated = 0;
  for (owner_id, user_id) in mapping {
    updated += conn.execute(
      "UPDATE rmas SET AssignedToUserID = ?1 WHERE InternalOwnerID = ?2",
      rusqlite::params![user_id, owner_id],
    )?;
  }
  tracing::info!(updated, "rewrote RMA assignments to user ids");
  Ok(updated)
}

/// One application of the copy-rename protocol.
pub struct CopyRename {
  pub table:      &'static str,
  /// DDL for the `<table>_new` shadow, already in user-space.
  pub shadow_ddl: &'static str,
  /// `INSERT INTO <table>_new … SELECT …` joining old rows to `users`.
  pub copy_sql:   &'static str,
}

impl CopyRename {
  /// Run the protocol; returns whether the table was rebuilt.
  ///
  /// Skips when the table is absent or already keyed by `UserID`. Fails
  /// with [`rmadb_core::Error::RowsDropped`] if the join loses rows, rather
  /// than silently discarding links whose owner cannot be resolved.
  pub fn apply(&self, conn: &Connection) -> Result<bool> {
    if !table_exists(conn, self.table)? {
      tracing::info!(table = self.table, "table does not exist, skipping rebuild");
      return Ok(false);
    }
    if !column_exists(conn, self.table, "OwnerID")? {
      tracing::info!(table = self.table, "already keyed by UserID, skipping rebuild");
      return Ok(false);
    }

    let expected: u64 = conn.query_row(
      &format!("SELECT count(*) FROM {}", self.table),
      [],
      |row| row.get(0),
    )?;

    conn.execute(self.shadow_ddl, [])?;
    let migrated = conn.execute(self.copy_sql, [])? as u64;

    if migrated != expected {
      return Err(
        rmadb_core::Error::RowsDropped {
          table: self.table.to_owned(),
          expected,
          migrated,
        }
        .into(),
      );
    }

    conn.execute(&format!("DROP TABLE {}", self.table), [])?;
    conn.execute(
      &format!("ALTER TABLE {table}_new RENAME TO {table}", table = self.table),
      [],
    )?;

    tracing::info!(table = self.table, rows = migrated, "rebuilt table in user-space");
    Ok(true)
  }
}

/// `rma_owners`: many-to-many RMA↔owner links, preserving the primary flag
/// and audit fields, with the `(RMAID, UserID)` uniqueness and cascade
/// deletes of the original.
pub fn owner_links() -> CopyRename {
  CopyRename {
    table:      "rma_owners",
    shadow_ddl: "CREATE TABLE rma_owners_new (
        RMAOwnerID      INTEGER PRIMARY KEY AUTOINCREMENT,
        RMAID           INTEGER NOT NULL,
        UserID          INTEGER NOT NULL,
        IsPrimary       INTEGER DEFAULT 0,
        AssignedOn      TEXT NOT NULL,
        AssignedBy      INTEGER,
        FOREIGN KEY (RMAID) REFERENCES rmas(RMAID) ON DELETE CASCADE,
        FOREIGN KEY (UserID) REFERENCES users(UserID) ON DELETE CASCADE,
        FOREIGN KEY (AssignedBy) REFERENCES users(UserID),
        UNIQUE(RMAID, UserID)
    )",
    copy_sql:   "INSERT INTO rma_owners_new (RMAID, UserID, IsPrimary, AssignedOn, AssignedBy)
     SELECT ro.RMAID, u.UserID, ro.IsPrimary, ro.AssignedOn, ro.AssignedBy
     FROM rma_owners ro
     JOIN internal_owners o ON ro.OwnerID = o.OwnerID
     JOIN users u ON o.OwnerEmail = u.Email",
  }
}

/// `owner_notification_preferences`: one settings row per identity, keyed
/// by `UserID` with the one-row-per-user uniqueness preserved.
pub fn preferences() -> CopyRename {
  CopyRename {
    table:      "owner_notification_preferences",
    shadow_ddl: "CREATE TABLE owner_notification_preferences_new (
        PrefID          INTEGER PRIMARY KEY AUTOINCREMENT,
        UserID          INTEGER NOT NULL UNIQUE,
        EmailEnabled    INTEGER DEFAULT 1,
        Frequency       TEXT DEFAULT 'daily',
        RMAAge          INTEGER DEFAULT 3,
        LastSent        TEXT,
        FOREIGN KEY (UserID) REFERENCES users(UserID) ON DELETE CASCADE
    )",
    copy_sql:   "INSERT INTO owner_notification_preferences_new
       (UserID, EmailEnabled, Frequency, RMAAge, LastSent)
     SELECT u.UserID, p.EmailEnabled, p.Frequency, p.RMAAge, p.LastSent
     FROM owner_notification_preferences p
     JOIN internal_owners o ON p.OwnerID = o.OwnerID
     JOIN users u ON o.OwnerEmail = u.Email",
  }
}
