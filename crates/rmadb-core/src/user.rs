//! User-side constants and helpers for synthesizing accounts.

use chrono::Local;

/// Placeholder password assigned to every user account the migration
/// creates. This is a documented contract with the surrounding application:
/// it must force a reset on the first authenticated use of such an account.
pub const PLACEHOLDER_PASSWORD: &str = "ChangeMe123!";

/// Role given to synthesized accounts — the default non-privileged role.
pub const DEFAULT_ROLE: &str = "user";

/// Text format of `CreatedOn` and the other audit timestamps in the store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Candidate username for a synthesized account: the local part of the
/// owner's email. Collisions are disambiguated by the caller, which appends
/// the legacy owner id.
pub fn username_candidate(email: &str) -> &str {
  match email.find('@') {
    Some(at) => &email[..at],
    None => email,
  }
}

/// Current wall-clock time in the store's text timestamp format.
pub fn now_stamp() -> String {
  Local::now().format(TIMESTAMP_FORMAT).to_string()
}
