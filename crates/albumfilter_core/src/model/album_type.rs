//! Album type vocabulary.
//!
//! # Responsibility
//! - Define the fixed set of album categories a library can be filtered by.
//! - Own the stable string ids shared by storage, serde and filter controls.
//!
//! # Invariants
//! - `AlbumType::ALL` is the canonical display order.
//! - String ids are lowercase and never change once released.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category of an album in the library.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlbumType {
    /// Full-length release.
    #[default]
    Lp,
    /// Extended play.
    Ep,
    Compilation,
    /// Live recording.
    Live,
    /// Various-artists release.
    Various,
    Demo,
    Single,
}

/// Storage/wire id for [`AlbumType::Lp`].
pub const ALBUM_TYPE_LP: &str = "lp";
/// Storage/wire id for [`AlbumType::Ep`].
pub const ALBUM_TYPE_EP: &str = "ep";
/// Storage/wire id for [`AlbumType::Compilation`].
pub const ALBUM_TYPE_COMPILATION: &str = "compilation";
/// Storage/wire id for [`AlbumType::Live`].
pub const ALBUM_TYPE_LIVE: &str = "live";
/// Storage/wire id for [`AlbumType::Various`].
pub const ALBUM_TYPE_VARIOUS: &str = "various";
/// Storage/wire id for [`AlbumType::Demo`].
pub const ALBUM_TYPE_DEMO: &str = "demo";
/// Storage/wire id for [`AlbumType::Single`].
pub const ALBUM_TYPE_SINGLE: &str = "single";

impl AlbumType {
    /// Every album type in canonical order.
    pub const ALL: [AlbumType; 7] = [
        AlbumType::Lp,
        AlbumType::Ep,
        AlbumType::Compilation,
        AlbumType::Live,
        AlbumType::Various,
        AlbumType::Demo,
        AlbumType::Single,
    ];

    /// Stable string id used in storage and in filter control names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lp => ALBUM_TYPE_LP,
            Self::Ep => ALBUM_TYPE_EP,
            Self::Compilation => ALBUM_TYPE_COMPILATION,
            Self::Live => ALBUM_TYPE_LIVE,
            Self::Various => ALBUM_TYPE_VARIOUS,
            Self::Demo => ALBUM_TYPE_DEMO,
            Self::Single => ALBUM_TYPE_SINGLE,
        }
    }

    /// User-facing plural label.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Lp => "LPs",
            Self::Ep => "EPs",
            Self::Compilation => "Compilations",
            Self::Live => "Live",
            Self::Various => "Various Artists",
            Self::Demo => "Demos",
            Self::Single => "Singles",
        }
    }
}

impl Display for AlbumType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one album type from its string id.
///
/// Leading/trailing whitespace is ignored; matching is otherwise exact.
pub fn parse_album_type(value: &str) -> Result<AlbumType, AlbumTypeError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(AlbumTypeError::EmptyType);
    }

    AlbumType::ALL
        .into_iter()
        .find(|kind| kind.as_str() == normalized)
        .ok_or_else(|| AlbumTypeError::UnknownType(normalized.to_string()))
}

/// Album type parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumTypeError {
    EmptyType,
    UnknownType(String),
}

impl Display for AlbumTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyType => write!(f, "album type must not be empty"),
            Self::UnknownType(value) => write!(f, "unknown album type `{value}`"),
        }
    }
}

impl Error for AlbumTypeError {}
