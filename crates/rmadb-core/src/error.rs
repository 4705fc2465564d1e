//! Error types for `rmadb-core`.
//!
//! These are the migration's domain invariants; anything database-level
//! stays in the engine crate's error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A legacy owner row carries no email address, so neither the in-memory
  /// resolution pass nor the join-based rebuild can map it to a user. The
  /// run fails rather than silently dropping the owner's dependent rows.
  #[error("legacy owner {0} has no email address and cannot be resolved to a user")]
  OwnerMissingEmail(i64),

  /// A copy-rename rebuild carried over fewer rows than the source table
  /// held. Left unchecked this would be silent data loss.
  #[error("rebuilding {table} carried over {migrated} of {expected} rows")]
  RowsDropped {
    table:    String,
    expected: u64,
    migrated: u64,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
