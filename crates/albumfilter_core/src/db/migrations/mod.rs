//! Schema migrations for the album library.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - Pending migrations are applied in a single transaction.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_albums.sql"),
}];

/// Latest schema version this build knows about.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies every migration newer than the connection's `user_version`.
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the database is newer than
///   this build.
/// - [`DbError::Migration`] naming the first migration that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    apply_migration_set(conn, MIGRATIONS)
}

fn apply_migration_set(conn: &mut Connection, migrations: &[Migration]) -> DbResult<()> {
    let current = schema_version(conn)?;
    let latest = migrations.last().map_or(0, |migration| migration.version);

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in migrations.iter().filter(|m| m.version > current) {
        run_migration(&tx, migration).map_err(|source| {
            error!(
                "event=db_migrate module=db status=error version={} from_version={}",
                migration.version, current
            );
            DbError::Migration {
                version: migration.version,
                source,
            }
        })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current, latest
    );
    Ok(())
}

fn run_migration(tx: &Transaction<'_>, migration: &Migration) -> rusqlite::Result<()> {
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{apply_migration_set, schema_version, Migration};
    use crate::db::DbError;
    use rusqlite::Connection;

    const SHELVES: Migration = Migration {
        version: 1,
        sql: "CREATE TABLE shelves (id INTEGER PRIMARY KEY);",
    };
    const BROKEN: Migration = Migration {
        version: 2,
        sql: "ALTER TABLE missing_table ADD COLUMN label TEXT;",
    };

    #[test]
    fn failed_migration_reports_its_version() {
        let mut conn = Connection::open_in_memory().unwrap();

        let err = apply_migration_set(&mut conn, &[SHELVES, BROKEN]).unwrap_err();
        assert!(matches!(err, DbError::Migration { version: 2, .. }));
        assert_eq!(err.code(), "migration_failed");
        assert!(err.to_string().contains("migration 2"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn failed_migration_rolls_back_the_pending_batch() {
        let mut conn = Connection::open_in_memory().unwrap();

        apply_migration_set(&mut conn, &[SHELVES, BROKEN]).unwrap_err();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        let shelves: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'shelves';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(shelves, 0);
    }

    #[test]
    fn migrations_resume_from_the_applied_version() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migration_set(&mut conn, &[SHELVES]).unwrap();

        let err = apply_migration_set(&mut conn, &[SHELVES, BROKEN]).unwrap_err();
        assert!(matches!(err, DbError::Migration { version: 2, .. }));
        assert_eq!(schema_version(&conn).unwrap(), 1);
    }
}
