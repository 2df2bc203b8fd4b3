//! Album repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store library albums and list them through album type selections.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Writes call `Album::validate()` before touching SQL.
//! - Reads reject invalid persisted rows instead of masking them.
//! - Type selections are bound as parameters, never spliced into SQL.

use crate::db::DbError;
use crate::model::album::{Album, AlbumId, AlbumValidationError};
use crate::model::album_type::{parse_album_type, AlbumType};
use crate::query::parse::AlbumTypeSelection;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ALBUM_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    artist,
    type,
    release_year
FROM albums";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for album persistence and listing.
#[derive(Debug)]
pub enum RepoError {
    Validation(AlbumValidationError),
    Db(DbError),
    NotFound(AlbumId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "album not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted album data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<AlbumValidationError> for RepoError {
    fn from(value: AlbumValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Options for listing albums.
#[derive(Debug, Clone, Default)]
pub struct AlbumListQuery {
    pub types: AlbumTypeSelection,
    /// Exact artist name match.
    pub artist: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for library albums.
pub trait AlbumRepository {
    fn create_album(&self, album: &Album) -> RepoResult<AlbumId>;
    fn get_album(&self, id: AlbumId) -> RepoResult<Option<Album>>;
    fn set_album_type(&self, id: AlbumId, kind: AlbumType) -> RepoResult<()>;
    fn list_albums(&self, query: &AlbumListQuery) -> RepoResult<Vec<Album>>;
    /// Album count per type, in canonical type order, zero counts included.
    fn count_by_type(&self, artist: Option<&str>) -> RepoResult<Vec<(AlbumType, u32)>>;
}

/// SQLite-backed album repository.
pub struct SqliteAlbumRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAlbumRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AlbumRepository for SqliteAlbumRepository<'_> {
    fn create_album(&self, album: &Album) -> RepoResult<AlbumId> {
        album.validate()?;

        self.conn.execute(
            "INSERT INTO albums (uuid, title, artist, type, release_year)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                album.uuid.to_string(),
                album.title.as_str(),
                album.artist.as_str(),
                album.kind.as_str(),
                album.release_year,
            ],
        )?;

        Ok(album.uuid)
    }

    fn get_album(&self, id: AlbumId) -> RepoResult<Option<Album>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ALBUM_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_album_row(row)?));
        }
        Ok(None)
    }

    fn set_album_type(&self, id: AlbumId, kind: AlbumType) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE albums SET type = ?1 WHERE uuid = ?2;",
            params![kind.as_str(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_albums(&self, query: &AlbumListQuery) -> RepoResult<Vec<Album>> {
        let mut sql = format!("{ALBUM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        push_type_clause(&mut sql, &mut bind_values, "IN", &query.types.include);
        push_type_clause(&mut sql, &mut bind_values, "NOT IN", &query.types.exclude);

        if let Some(artist) = &query.artist {
            sql.push_str(" AND artist = ?");
            bind_values.push(Value::Text(artist.clone()));
        }

        sql.push_str(" ORDER BY artist ASC, release_year ASC, title ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ? OFFSET ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            bind_values.push(Value::Integer(i64::from(query.offset)));
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut albums = Vec::new();
        while let Some(row) = rows.next()? {
            albums.push(parse_album_row(row)?);
        }
        Ok(albums)
    }

    fn count_by_type(&self, artist: Option<&str>) -> RepoResult<Vec<(AlbumType, u32)>> {
        let mut stmt = self.conn.prepare(
            "SELECT type, COUNT(*) AS total
             FROM albums
             WHERE (?1 IS NULL OR artist = ?1)
             GROUP BY type;",
        )?;
        let mut rows = stmt.query([artist])?;

        let mut counts = AlbumType::ALL.map(|kind| (kind, 0_u32));
        while let Some(row) = rows.next()? {
            let kind = parse_type_column(row)?;
            let total: u32 = row.get("total")?;
            if let Some(slot) = counts.iter_mut().find(|(k, _)| *k == kind) {
                slot.1 = total;
            }
        }
        Ok(counts.to_vec())
    }
}

fn push_type_clause(sql: &mut String, binds: &mut Vec<Value>, op: &str, kinds: &[AlbumType]) {
    if kinds.is_empty() {
        return;
    }
    let placeholders = vec!["?"; kinds.len()].join(", ");
    sql.push_str(&format!(" AND type {op} ({placeholders})"));
    binds.extend(
        kinds
            .iter()
            .map(|kind| Value::Text(kind.as_str().to_string())),
    );
}

fn parse_type_column(row: &Row<'_>) -> RepoResult<AlbumType> {
    let type_text: String = row.get("type")?;
    parse_album_type(&type_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid album type `{type_text}` in albums.type"))
    })
}

fn parse_album_row(row: &Row<'_>) -> RepoResult<Album> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in albums.uuid"))
    })?;

    let album = Album {
        uuid,
        title: row.get("title")?,
        artist: row.get("artist")?,
        kind: parse_type_column(row)?,
        release_year: row.get("release_year")?,
    };
    album.validate()?;
    Ok(album)
}
