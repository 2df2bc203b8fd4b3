//! Album type filtering for a music library.
//!
//! Builds `?type=...` query fragments from filter control state, parses them
//! back, and applies them to a SQLite-backed album library.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::album::{Album, AlbumId, AlbumValidationError};
pub use model::album_type::{parse_album_type, AlbumType, AlbumTypeError};
pub use model::control::{
    default_type_controls, FilterControl, InMemoryControls, TypeFilterControl,
};
pub use query::builder::{query_from_source, type_query_fragment, ControlSource};
pub use query::parse::{
    parse_type_query, AlbumTypeSelection, TypeFilter, TypeQueryError, TypeToken,
};
pub use repo::album_repo::{
    AlbumListQuery, AlbumRepository, RepoError, RepoResult, SqliteAlbumRepository,
};
pub use service::album_service::{
    parse_tab, AlbumService, ServiceError, ServiceResult, TabKind, TypeTab,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
