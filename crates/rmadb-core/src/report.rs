//! Resolution and run-report types returned by the engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::user::PLACEHOLDER_PASSWORD;

/// Output of the identity-resolution stage: a total mapping from legacy
/// owner ids to user ids, plus the counts accumulated over the pass.
///
/// The counts are observable output only; no control decision reads them.
#[derive(Debug, Default)]
pub struct OwnerResolution {
  pub mapping:          BTreeMap<i64, i64>,
  /// Owners whose email matched an existing user account.
  pub matched_existing: usize,
  /// Owners for whom a user account was synthesized.
  pub created:          usize,
}

/// Summary of one committed migration run.
#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
  /// Existing users flagged as owners by email match.
  pub matched_existing:     usize,
  /// User accounts synthesized with the placeholder password.
  pub created:              usize,
  /// `rmas` rows whose assignment was rewritten to user-space.
  pub assignments_updated:  usize,
  /// Whether `rma_owners` was rebuilt this run.
  pub owner_links_rebuilt:  bool,
  /// Whether `owner_notification_preferences` was rebuilt this run.
  pub preferences_rebuilt:  bool,
  /// Total users carrying the owner flag after the run.
  pub owners_flagged:       u64,
}

impl MigrationReport {
  /// True when the run changed nothing — every stage classified its work
  /// as already applied.
  pub fn is_noop(&self) -> bool {
    self.matched_existing == 0
      && self.created == 0
      && self.assignments_updated == 0
      && !self.owner_links_rebuilt
      && !self.preferences_rebuilt
  }
}

impl fmt::Display for MigrationReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "{} existing user(s) marked as owners, {} new user(s) created",
      self.matched_existing, self.created
    )?;
    writeln!(f, "{} assignment(s) rewritten to user ids", self.assignments_updated)?;
    if self.owner_links_rebuilt {
      writeln!(f, "rma_owners rebuilt against users")?;
    }
    if self.preferences_rebuilt {
      writeln!(f, "owner_notification_preferences rebuilt against users")?;
    }
    writeln!(f, "{} user(s) now carry the owner flag", self.owners_flagged)?;
    if self.created > 0 {
      writeln!(
        f,
        "warning: {} account(s) were created with the placeholder password \
         {PLACEHOLDER_PASSWORD:?} and must reset it on first login",
        self.created
      )?;
    }
    Ok(())
  }
}
