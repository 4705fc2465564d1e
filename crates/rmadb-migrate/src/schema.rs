//! Baseline SQL schema for a fresh rmadb database.
//!
//! Applied once at bootstrap (`rmadb init`). The DDL describes the
//! post-consolidation shape — ownership lives on `users`, and the dependent
//! tables key on `UserID` — so a freshly initialised database needs no
//! migration and the engine classifies every stage as already applied.

/// Full baseline DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    UserID          INTEGER PRIMARY KEY AUTOINCREMENT,
    Username        TEXT NOT NULL UNIQUE,
    PasswordHash    TEXT NOT NULL,
    FullName        TEXT,
    Email           TEXT UNIQUE,
    Role            TEXT NOT NULL DEFAULT 'user',
    IsOwner         INTEGER DEFAULT 0,
    CreatedOn       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS rmas (
    RMAID            INTEGER PRIMARY KEY AUTOINCREMENT,
    RMANumber        TEXT NOT NULL UNIQUE,
    CustomerName     TEXT,
    Status           TEXT NOT NULL DEFAULT 'open',
    AssignedToUserID INTEGER REFERENCES users(UserID),
    CreatedOn        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS rma_owners (
    RMAOwnerID      INTEGER PRIMARY KEY AUTOINCREMENT,
    RMAID           INTEGER NOT NULL,
    UserID          INTEGER NOT NULL,
    IsPrimary       INTEGER DEFAULT 0,
    AssignedOn      TEXT NOT NULL,
    AssignedBy      INTEGER,
    FOREIGN KEY (RMAID) REFERENCES rmas(RMAID) ON DELETE CASCADE,
    FOREIGN KEY (UserID) REFERENCES users(UserID) ON DELETE CASCADE,
    FOREIGN KEY (AssignedBy) REFERENCES users(UserID),
    UNIQUE(RMAID, UserID)
);

CREATE TABLE IF NOT EXISTS owner_notification_preferences (
    PrefID          INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID          INTEGER NOT NULL UNIQUE,
    EmailEnabled    INTEGER DEFAULT 1,
    Frequency       TEXT DEFAULT 'daily',
    RMAAge          INTEGER DEFAULT 3,
    LastSent        TEXT,
    FOREIGN KEY (UserID) REFERENCES users(UserID) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_users_isowner ON users(IsOwner);
CREATE INDEX IF NOT EXISTS idx_rmas_assigned ON rmas(AssignedToUserID);
";
