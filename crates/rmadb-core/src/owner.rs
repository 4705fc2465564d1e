//! LegacyOwner — the pre-migration identity entity being retired.
//!
//! Rows are read-only during a run; the whole `internal_owners` table is
//! dropped once every owner has been folded into `users`.

/// One row of the legacy `internal_owners` table.
#[derive(Debug, Clone)]
pub struct LegacyOwner {
  pub owner_id: i64,
  /// The sole join key between owner-space and user-space. `None` is a
  /// fatal condition; see [`crate::Error::OwnerMissingEmail`].
  pub email:    Option<String>,
  pub name:     Option<String>,
}
