//! Core types for the rmadb owner-consolidation migration.
//!
//! This crate is deliberately free of database dependencies.
//! The engine crate depends on it; it depends on nothing proprietary.

pub mod error;
pub mod owner;
pub mod report;
pub mod user;

pub use error::{Error, Result};
