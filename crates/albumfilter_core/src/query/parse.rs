//! Album type query fragment parsing.
//!
//! # Responsibility
//! - Read a fragment produced by [`crate::query::builder`] back into a typed
//!   filter for library queries.
//!
//! # Invariants
//! - Token order is preserved.
//! - Pairs with keys other than `type` are ignored; a `type` pair is either
//!   read into a token or rejected, never skipped.
//! - Names are taken verbatim; no percent-decoding.

use crate::model::album_type::{parse_album_type, AlbumType, AlbumTypeError};
use crate::query::builder::{push_token, TYPE_QUERY_KEY};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TYPE_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^type=(?P<exclude>!?)(?P<name>.*)$").expect("valid type pair regex")
});

/// One `type=` token of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken {
    pub name: String,
    /// `false` for `type=!name` tokens.
    pub included: bool,
}

/// Parsed album type filter, in fragment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    pub tokens: Vec<TypeToken>,
}

impl TypeFilter {
    /// Whether the filter places no restriction at all.
    pub fn is_unrestricted(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Names of included types, in fragment order.
    pub fn included(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|token| token.included)
            .map(|token| token.name.as_str())
    }

    /// Names of excluded types, in fragment order.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|token| !token.included)
            .map(|token| token.name.as_str())
    }

    /// Rebuilds the `?`/`&` fragment for this filter.
    pub fn to_fragment(&self) -> String {
        let mut fragment = String::new();
        for token in &self.tokens {
            fragment.push(if fragment.is_empty() { '?' } else { '&' });
            push_token(&mut fragment, &token.name, token.included);
        }
        fragment
    }

    /// Resolves token names into known album types.
    ///
    /// # Errors
    /// - Returns [`AlbumTypeError`] for the first name that is not a known type.
    pub fn album_types(&self) -> Result<AlbumTypeSelection, AlbumTypeError> {
        let mut selection = AlbumTypeSelection::default();
        for token in &self.tokens {
            let kind = parse_album_type(&token.name)?;
            let target = if token.included {
                &mut selection.include
            } else {
                &mut selection.exclude
            };
            if !target.contains(&kind) {
                target.push(kind);
            }
        }
        Ok(selection)
    }
}

/// Album types selected by a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumTypeSelection {
    pub include: Vec<AlbumType>,
    pub exclude: Vec<AlbumType>,
}

impl AlbumTypeSelection {
    /// Whether every album type passes.
    pub fn is_unrestricted(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// A type matches when it is not excluded and is included (or nothing is).
    pub fn matches(&self, kind: AlbumType) -> bool {
        if self.exclude.contains(&kind) {
            return false;
        }
        self.include.is_empty() || self.include.contains(&kind)
    }
}

/// Parses an album type query fragment.
///
/// A leading `?` is optional. Empty input yields an unrestricted filter.
///
/// # Errors
/// - Returns [`TypeQueryError::EmptyName`] for `type=` or `type=!` pairs.
/// - Returns [`TypeQueryError::MalformedPair`] for a bare `type` key.
pub fn parse_type_query(fragment: &str) -> Result<TypeFilter, TypeQueryError> {
    let trimmed = fragment.trim();
    let body = trimmed.strip_prefix('?').unwrap_or(trimmed);
    let mut filter = TypeFilter::default();

    for (position, pair) in body.split('&').enumerate() {
        if pair.is_empty() {
            continue;
        }
        let Some(captures) = TYPE_PAIR_RE.captures(pair) else {
            if pair_key(pair) == TYPE_QUERY_KEY {
                return Err(TypeQueryError::MalformedPair { position });
            }
            continue;
        };

        let name = captures.name("name").map_or("", |m| m.as_str());
        if name.is_empty() {
            return Err(TypeQueryError::EmptyName { position });
        }
        let included = captures.name("exclude").map_or(true, |m| m.as_str().is_empty());

        filter.tokens.push(TypeToken {
            name: name.to_string(),
            included,
        });
    }

    Ok(filter)
}

fn pair_key(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(key, _)| key)
}

/// Fragment parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeQueryError {
    /// Zero-based index of the offending `&`-separated pair.
    EmptyName { position: usize },
    /// A `type` key without a `=<name>` value.
    MalformedPair { position: usize },
}

impl Display for TypeQueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { position } => {
                write!(f, "type query pair {position} has an empty name")
            }
            Self::MalformedPair { position } => {
                write!(f, "type query pair {position} is missing `=<name>`")
            }
        }
    }
}

impl Error for TypeQueryError {}
