//! Migration engine that consolidates `internal_owners` into `users`.
//!
//! The engine inspects the current schema, applies whatever structural and
//! data transformations are still pending, and resolves identity conflicts
//! between existing user accounts and legacy owner records. All stages run
//! inside one exclusive transaction; any failure rolls the whole run back.
//! Running against an already-migrated database is a no-op.

mod augment;
mod engine;
mod probe;
mod rebuild;
mod resolve;

pub mod error;
pub mod schema;

pub use engine::run;
pub use error::{Error, Result};
