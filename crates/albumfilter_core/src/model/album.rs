//! Album domain model.
//!
//! # Responsibility
//! - Define the library record that type filters are applied to.
//!
//! # Invariants
//! - `uuid` is never nil.
//! - `title` and `artist` are never blank.

use crate::model::album_type::AlbumType;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a library album.
pub type AlbumId = Uuid;

/// Library album record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub uuid: AlbumId,
    pub title: String,
    pub artist: String,
    /// Serialized as `type` to match the filter query key.
    #[serde(rename = "type")]
    pub kind: AlbumType,
    pub release_year: Option<i32>,
}

impl Album {
    /// Creates an album with a generated stable ID.
    pub fn new(title: impl Into<String>, artist: impl Into<String>, kind: AlbumType) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            artist: artist.into(),
            kind,
            release_year: None,
        }
    }

    /// Creates an album with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        uuid: AlbumId,
        title: impl Into<String>,
        artist: impl Into<String>,
        kind: AlbumType,
    ) -> Result<Self, AlbumValidationError> {
        let album = Self {
            uuid,
            title: title.into(),
            artist: artist.into(),
            kind,
            release_year: None,
        };
        album.validate()?;
        Ok(album)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), AlbumValidationError> {
        if self.uuid.is_nil() {
            return Err(AlbumValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(AlbumValidationError::EmptyTitle);
        }
        if self.artist.trim().is_empty() {
            return Err(AlbumValidationError::EmptyArtist);
        }
        Ok(())
    }
}

/// Album invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumValidationError {
    NilUuid,
    EmptyTitle,
    EmptyArtist,
}

impl Display for AlbumValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "album uuid must not be nil"),
            Self::EmptyTitle => write!(f, "album title must not be empty"),
            Self::EmptyArtist => write!(f, "album artist must not be empty"),
        }
    }
}

impl Error for AlbumValidationError {}
