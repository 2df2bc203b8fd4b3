//! Domain model for album type filtering.
//!
//! # Responsibility
//! - Define the album type vocabulary and the library album record.
//! - Describe filter controls as read-only records supplied by a UI host.
//!
//! # Invariants
//! - Album type ids are the single naming source for storage and queries.

pub mod album;
pub mod album_type;
pub mod control;
