//! `rmadb` — bootstrap and migrate the RMA tracker database.
//!
//! # Usage
//!
//! ```
//! rmadb init                  # create the baseline schema if absent
//! rmadb migrate               # consolidate internal_owners into users
//! rmadb --db /path/rma.db migrate --json
//! ```
//!
//! `migrate` exits non-zero if anything fails; in that case the whole run
//! was rolled back and the database is unchanged.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "RMA tracker database tool")]
struct Cli {
  /// Path to the SQLite database file.
  #[arg(long, default_value = "rma.db")]
  db: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Apply the baseline schema (idempotent).
  Init,

  /// Consolidate the legacy internal_owners table into users.
  Migrate {
    /// Emit the run report as JSON instead of the human summary.
    #[arg(long)]
    json: bool,
  },
}

fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut conn = Connection::open(&cli.db)
    .with_context(|| format!("failed to open database at {:?}", cli.db))?;

  match cli.command {
    Command::Init => {
      conn
        .execute_batch(rmadb_migrate::schema::SCHEMA)
        .context("failed to apply baseline schema")?;
      println!("database initialised at {:?}", cli.db);
    }
    Command::Migrate { json } => {
      let report = rmadb_migrate::run(&mut conn)
        .context("migration failed; all changes were rolled back")?;

      if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
      } else if report.is_noop() {
        println!("nothing to do — database is already consolidated");
        print!("{report}");
      } else {
        println!("migration completed successfully");
        print!("{report}");
      }
    }
  }

  Ok(())
}
