//! Stage ordering and the one transaction every stage shares.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use rmadb_core::report::MigrationReport;

use crate::{
  Result,
  augment::ensure_column,
  probe::table_exists,
  rebuild::{owner_links, preferences, rebuild_assignments},
  resolve::resolve_owners,
};

/// Run the full consolidation inside one exclusive write transaction.
///
/// On success every stage has committed; on error the transaction is
/// dropped and rolled back, leaving the database exactly as it was —
/// including any `ALTER TABLE` the early stages performed.
pub fn run(conn: &mut Connection) -> Result<MigrationReport> {
  let tx = conn.transaction_with_behavior(TransactionBehavior::Exclusive)?;
  let report = run_stages(&tx)?;
  tx.commit()?;
  tracing::info!("migration committed");
  Ok(report)
}

fn run_stages(tx: &Transaction<'_>) -> Result<MigrationReport> {
  // Structural augmentation, gated on the schema probes. A missing rmas
  // table means there are no assignments to migrate, not a failure.
  ensure_column(tx, "users", "IsOwner", "INTEGER DEFAULT 0")?;
  let has_rmas = table_exists(tx, "rmas")?;
  if has_rmas {
    ensure_column(tx, "rmas", "AssignedToUserID", "INTEGER")?;
  } else {
    tracing::info!("rmas does not exist, skipping assignment column");
  }

  // Identity resolution; its mapping is the only input stage 4 consumes.
  let resolution = resolve_owners(tx)?;

  // Dependent-table rebuilds.
  let assignments_updated = rebuild_assignments(tx, &resolution.mapping)?;
  let owner_links_rebuilt = owner_links().apply(tx)?;
  let preferences_rebuilt = preferences().apply(tx)?;

  // Finalize: retire the legacy entity and (re)create supporting indexes.
  tx.execute("DROP TABLE IF EXISTS internal_owners", [])?;
  tx.execute("CREATE INDEX IF NOT EXISTS idx_users_isowner ON users(IsOwner)", [])?;
  if has_rmas {
    tx.execute("CREATE INDEX IF NOT EXISTS idx_rmas_assigned ON rmas(AssignedToUserID)", [])?;
  }

  let owners_flagged: u64 =
    tx.query_row("SELECT count(*) FROM users WHERE IsOwner = 1", [], |row| row.get(0))?;

  Ok(MigrationReport {
    matched_existing: resolution.matched_existing,
    created: resolution.created,
    assignments_updated,
    owner_links_rebuilt,
    preferences_rebuilt,
    owners_flagged,
  })
}
