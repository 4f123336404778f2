#[cfg(feature = "store-sqlite")]
use std::path::PathBuf;

use thiserror::Error;

use crate::{EntityKind, SuggestionKind};

/// Errors raised by catalogue reads and link writes.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested episode does not exist.
    #[error("episode {episode_id} was not found")]
    UnknownEpisode {
        /// Identifier that failed to resolve.
        episode_id: String,
    },
    /// A link referenced a location or item that does not exist.
    #[error("{kind} {entity_id} was not found")]
    UnknownEntity {
        kind: SuggestionKind,
        entity_id: String,
    },
    /// The link already exists.
    #[error("episode {episode_id} is already linked to {kind} {entity_id}")]
    DuplicateLink {
        episode_id: String,
        kind: SuggestionKind,
        entity_id: String,
    },
    /// The backend could not serve the request.
    #[error("catalogue backend unavailable during {operation}")]
    Unavailable {
        /// Description of the failed operation.
        operation: &'static str,
    },
    /// Opening the SQLite database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open SQLite catalogue at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing or executing a query failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored tag payload was not a JSON array of strings.
    #[cfg(feature = "serde")]
    #[error("failed to parse tags for {kind} {id}: {source}")]
    InvalidTags {
        kind: EntityKind,
        id: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored timestamp was not RFC 3339.
    #[error("invalid timestamp {raw:?} on {kind} {id}: {source}")]
    InvalidTimestamp {
        kind: EntityKind,
        id: String,
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored count could not be represented as `u32`.
    #[error("link count {raw} on {kind} {id} is out of range")]
    CountOutOfRange {
        kind: EntityKind,
        id: String,
        raw: i64,
    },
}
