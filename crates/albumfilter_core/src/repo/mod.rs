//! Repository layer for the album library.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from services.
//!
//! # Invariants
//! - Repository writes enforce `Album::validate()` before persistence.

pub mod album_repo;
