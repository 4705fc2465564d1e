//! Error type for `rmadb-migrate`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rmadb_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("password hash error: {0}")]
  PasswordHash(argon2::password_hash::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
