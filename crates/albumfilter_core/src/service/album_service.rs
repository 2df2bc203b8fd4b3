//! Album library use-case service.
//!
//! # Responsibility
//! - Apply type query fragments to the album library.
//! - Shape browsing tab summaries: `All` first, then one per album type.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Logged events carry counts only, never album or filter names.

use crate::model::album::{Album, AlbumId};
use crate::model::album_type::{parse_album_type, AlbumType, AlbumTypeError};
use crate::query::parse::{parse_type_query, TypeQueryError};
use crate::repo::album_repo::{AlbumListQuery, AlbumRepository, RepoError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level error.
#[derive(Debug)]
pub enum ServiceError {
    /// Fragment could not be parsed.
    Query(TypeQueryError),
    /// Fragment names a type the library does not know.
    Type(AlbumTypeError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "invalid type query: {err}"),
            Self::Type(err) => write!(f, "invalid type query: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::Type(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TypeQueryError> for ServiceError {
    fn from(value: TypeQueryError) -> Self {
        Self::Query(value)
    }
}

impl From<AlbumTypeError> for ServiceError {
    fn from(value: AlbumTypeError) -> Self {
        Self::Type(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Browsing tab selector: every album, or a single album type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    All,
    Type(AlbumType),
}

impl TabKind {
    pub const ALL_ID: &'static str = "all";

    /// `All` first, then every album type in canonical order.
    pub fn ordered() -> impl Iterator<Item = TabKind> {
        std::iter::once(Self::All).chain(AlbumType::ALL.into_iter().map(Self::Type))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => Self::ALL_ID,
            Self::Type(kind) => kind.as_str(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Type(kind) => kind.display_name(),
        }
    }
}

/// Parses a tab id: `all` (any case) or an album type id.
///
/// # Errors
/// - Same as [`parse_album_type`] for anything other than `all`.
pub fn parse_tab(value: &str) -> Result<TabKind, AlbumTypeError> {
    if value.trim().eq_ignore_ascii_case(TabKind::ALL_ID) {
        return Ok(TabKind::All);
    }
    parse_album_type(value).map(TabKind::Type)
}

/// One browsing tab with its album count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTab {
    pub kind: TabKind,
    pub display_name: &'static str,
    pub count: u32,
    pub active: bool,
}

impl TypeTab {
    /// Whether the tab has anything to show.
    pub fn has_albums(&self) -> bool {
        self.count > 0
    }
}

/// Use-case service over an album repository.
pub struct AlbumService<R: AlbumRepository> {
    repo: R,
}

impl<R: AlbumRepository> AlbumService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds an album to the library and returns its ID.
    pub fn add_album(
        &self,
        title: impl Into<String>,
        artist: impl Into<String>,
        kind: AlbumType,
        release_year: Option<i32>,
    ) -> ServiceResult<AlbumId> {
        let mut album = Album::new(title, artist, kind);
        album.release_year = release_year;
        Ok(self.repo.create_album(&album)?)
    }

    /// Lists albums matching a type query fragment.
    ///
    /// An empty fragment lists everything, mirroring the builder's
    /// "all checked" result.
    ///
    /// # Errors
    /// - [`ServiceError::Query`] for malformed `type` pairs.
    /// - [`ServiceError::Type`] for unknown type names.
    pub fn albums_for_query(
        &self,
        fragment: &str,
        artist: Option<&str>,
    ) -> ServiceResult<Vec<Album>> {
        let filter = parse_type_query(fragment).inspect_err(|err| {
            warn!("event=albums_for_query module=service status=error error={err}");
        })?;
        let types = filter.album_types()?;

        let query = AlbumListQuery {
            types,
            artist: artist.map(str::to_string),
            ..AlbumListQuery::default()
        };
        let albums = self.repo.list_albums(&query)?;

        debug!(
            "event=albums_for_query module=service status=ok tokens={} included={} excluded={} hits={}",
            filter.tokens.len(),
            query.types.include.len(),
            query.types.exclude.len(),
            albums.len()
        );
        Ok(albums)
    }

    /// Returns the `All` tab, then one tab per album type in canonical order.
    ///
    /// The `All` count is the total over every type.
    pub fn type_tabs(
        &self,
        active: Option<TabKind>,
        artist: Option<&str>,
    ) -> ServiceResult<Vec<TypeTab>> {
        let counts = self.repo.count_by_type(artist)?;
        let total = counts.iter().map(|(_, count)| *count).sum::<u32>();

        Ok(TabKind::ordered()
            .map(|kind| {
                let count = match kind {
                    TabKind::All => total,
                    TabKind::Type(album_type) => counts
                        .iter()
                        .find(|(counted, _)| *counted == album_type)
                        .map_or(0, |(_, count)| *count),
                };
                TypeTab {
                    kind,
                    display_name: kind.display_name(),
                    count,
                    active: active == Some(kind),
                }
            })
            .collect())
    }

    /// Picks the first tab, in tab order, that has albums.
    ///
    /// `All` comes first, so any non-empty library lands on it. Returns
    /// `None` for an empty library.
    pub fn default_tab(&self, artist: Option<&str>) -> ServiceResult<Option<TabKind>> {
        Ok(self
            .type_tabs(None, artist)?
            .into_iter()
            .find(TypeTab::has_albums)
            .map(|tab| tab.kind))
    }

    /// Moves an album to another type.
    pub fn retag_album(&self, id: AlbumId, kind: AlbumType) -> ServiceResult<()> {
        Ok(self.repo.set_album_type(id, kind)?)
    }
}
