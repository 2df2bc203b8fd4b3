//! SQLite storage for the album library.
//!
//! # Responsibility
//! - Open and configure connections.
//! - Bring the schema up to date before any album data is touched.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A failed migration leaves the schema at its previous version and is
//!   reported with the version that failed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Album database bootstrap and access errors.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Migration `version` failed; the whole pending batch was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The library file was written by a newer build.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
}

impl DbError {
    /// Stable `error_code` value used in `db_*` log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Migration { .. } => "migration_failed",
            Self::UnsupportedSchemaVersion { .. } => "schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "album database error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "album schema migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "album library schema {db_version} is newer than this build ({latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
