use albumfilter_core::db::migrations::{latest_version, schema_version};
use albumfilter_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "albums");
}

#[test]
fn reopening_a_database_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.sqlite3");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first).unwrap(), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    assert_table_exists(&second, "albums");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_rejects_unknown_album_types() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO albums (uuid, title, artist, type)
         VALUES ('11111111-2222-4333-8444-555555555555', 't', 'a', 'bootleg');",
        [],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

#[test]
fn newer_schema_error_carries_a_stable_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 7;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.code(), "schema_too_new");
    assert!(std::error::Error::source(&err).is_none());
}
