//! Data access traits for the catalogue backend.
//!
//! The hosted backend is consumed through two narrow request/response
//! interfaces: [`CatalogStore`] for reads and [`LinkStore`] for the single
//! write the review workflow performs. Both are synchronous; callers fetch a
//! snapshot, work on it in memory, and write back at most one record.

use crate::{CandidateSet, CatalogEntry, Episode, EpisodeLink};

mod error;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use error::CatalogError;
#[cfg(feature = "store-sqlite")]
pub use sqlite::SqliteCatalog;

/// Read-only access to catalogue records.
///
/// # Examples
///
/// ```rust
/// use oshikatsu_core::{
///     CandidateSet, CatalogEntry, CatalogError, CatalogStore, Episode, EpisodeLink, Location,
/// };
///
/// struct SingleEpisode {
///     episode: Episode,
///     locations: Vec<Location>,
/// }
///
/// impl CatalogStore for SingleEpisode {
///     fn episode(&self, episode_id: &str) -> Result<Episode, CatalogError> {
///         if self.episode.id == episode_id {
///             Ok(self.episode.clone())
///         } else {
///             Err(CatalogError::UnknownEpisode { episode_id: episode_id.to_owned() })
///         }
///     }
///
///     fn candidates_for_celebrity(&self, _celebrity_id: &str) -> Result<CandidateSet, CatalogError> {
///         Ok(CandidateSet::new(self.locations.clone(), Vec::new()))
///     }
///
///     fn links_for_episode(&self, _episode_id: &str) -> Result<Vec<EpisodeLink>, CatalogError> {
///         Ok(Vec::new())
///     }
///
///     fn catalog_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let store = SingleEpisode {
///     episode: Episode::new("ep-1", "celeb-1", "Harbour walk"),
///     locations: vec![Location::new("loc-1", "Harbour")],
/// };
/// assert!(store.episode("ep-2").is_err());
/// assert_eq!(store.candidates_for_celebrity("celeb-1").map(|c| c.len()).ok(), Some(1));
/// ```
pub trait CatalogStore {
    /// Fetch one episode.
    ///
    /// Returns [`CatalogError::UnknownEpisode`] when no such episode exists.
    fn episode(&self, episode_id: &str) -> Result<Episode, CatalogError>;

    /// Fetch every location and item owned by a celebrity, in stable order.
    fn candidates_for_celebrity(&self, celebrity_id: &str) -> Result<CandidateSet, CatalogError>;

    /// Fetch the links already recorded for an episode.
    fn links_for_episode(&self, episode_id: &str) -> Result<Vec<EpisodeLink>, CatalogError>;

    /// List every published record for sitemap generation.
    fn catalog_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}

/// Write access for association records.
pub trait LinkStore {
    /// Persist a link between an episode and an entity.
    ///
    /// Implementations must reject links to unknown records and duplicates
    /// rather than silently succeeding.
    fn create_link(&self, link: &EpisodeLink) -> Result<(), CatalogError>;
}
