//! Identity resolver: fold every legacy owner into the `users` table.
//!
//! Produces a total mapping from legacy owner ids to user ids. Owners whose
//! email matches an existing account get the owner flag; the rest get a
//! synthesized account with the documented placeholder password. Global
//! uniqueness of `Username` and `Email` is preserved throughout, including
//! between two legacy owners sharing one email in the same run: the first
//! creates the account, the second matches it.

use argon2::{Argon2, PasswordHasher as _, password_hash::SaltString};
use rand_core::OsRng;
use rusqlite::{Connection, OptionalExtension as _};

use rmadb_core::{
  owner::LegacyOwner,
  report::OwnerResolution,
  user::{DEFAULT_ROLE, PLACEHOLDER_PASSWORD, now_stamp, username_candidate},
};

use crate::{Error, Result, probe::table_exists};

/// Resolve every row of `internal_owners` to a user id, creating accounts
/// where none exist. A missing legacy table yields an empty resolution.
pub fn resolve_owners(conn: &Connection) -> Result<OwnerResolution> {
  if !table_exists(conn, "internal_owners")? {
    tracing::info!("internal_owners does not exist, no identities to resolve");
    return Ok(OwnerResolution::default());
  }

  let owners = load_owners(conn)?;
  tracing::info!(count = owners.len(), "resolving legacy owners");

  let mut resolution = OwnerResolution::default();
  for owner in owners {
    let email = owner
      .email
      .as_deref()
      .ok_or(rmadb_core::Error::OwnerMissingEmail(owner.owner_id))?;

    let user_id = match find_user_by_email(conn, email)? {
      Some(user_id) => {
        // Setting the flag again on a later duplicate email is harmless.
        conn.execute(
          "UPDATE users SET IsOwner = 1 WHERE UserID = ?1",
          rusqlite::params![user_id],
        )?;
        tracing::info!(owner_id = owner.owner_id, user_id, "marked existing user as owner");
        resolution.matched_existing += 1;
        user_id
      }
      None => {
        let user_id = create_owner_account(conn, &owner, email)?;
        resolution.created += 1;
        user_id
      }
    };

    resolution.mapping.insert(owner.owner_id, user_id);
  }

  Ok(resolution)
}

fn load_owners(conn: &Connection) -> Result<Vec<LegacyOwner>> {
  let mut stmt =
    conn.prepare("SELECT OwnerID, OwnerEmail, OwnerName FROM internal_owners ORDER BY OwnerID")?;
  let owners = stmt
    .query_map([], |row| {
      Ok(LegacyOwner {
        owner_id: row.get(0)?,
        email:    row.get(1)?,
        name:     row.get(2)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(owners)
}

fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<i64>> {
  let user_id = conn
    .query_row(
      "SELECT UserID FROM users WHERE Email = ?1",
      rusqlite::params![email],
      |row| row.get(0),
    )
    .optional()?;
  Ok(user_id)
}

/// Synthesize a user account for an owner with no matching email.
fn create_owner_account(conn: &Connection, owner: &LegacyOwner, email: &str) -> Result<i64> {
  let mut username = username_candidate(email).to_owned();

  let taken = conn
    .query_row(
      "SELECT 1 FROM users WHERE Username = ?1",
      rusqlite::params![username],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if taken {
    username = format!("{username}_{}", owner.owner_id);
  }

  conn.execute(
    "INSERT INTO users (Username, PasswordHash, FullName, Email, Role, IsOwner, CreatedOn)
     VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
    rusqlite::params![
      username,
      hash_placeholder()?,
      owner.name,
      email,
      DEFAULT_ROLE,
      now_stamp(),
    ],
  )?;

  let user_id = conn.last_insert_rowid();
  tracing::info!(owner_id = owner.owner_id, user_id, %username, "created user account for owner");
  Ok(user_id)
}

/// Argon2 PHC string for the placeholder password. The consuming
/// application must force a reset on these accounts at first login.
fn hash_placeholder() -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(PLACEHOLDER_PASSWORD.as_bytes(), &salt)
    .map_err(Error::PasswordHash)?;
  Ok(hash.to_string())
}
