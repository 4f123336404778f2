//! Core domain types for the oshikatsu catalogue engine.
//!
//! The crate defines the catalogue records curated in the back office
//! (episodes, filming locations, fashion items), the search corpus the
//! auto-matcher scans, the suggestions it produces, and the narrow store
//! traits through which the hosted backend is consumed.
//!
//! - [`Matcher`] turns a corpus and a [`Candidate`] into a [`MatchOutcome`].
//! - [`CatalogStore`] and [`LinkStore`] are the read and write seams used by
//!   the review workflow and the sitemap generator.
//! - [`SqliteCatalog`] (feature `store-sqlite`) is a local implementation of
//!   both.

pub mod catalog;
pub mod corpus;
pub mod link;
pub mod matcher;
pub mod store;
pub mod suggestion;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{Candidate, CandidateSet, CatalogEntry, EntityKind, Episode, Item, Location};
pub use corpus::SearchCorpus;
pub use link::{EpisodeLink, LinkTarget};
pub use matcher::Matcher;
pub use store::{CatalogError, CatalogStore, LinkStore};
#[cfg(feature = "store-sqlite")]
pub use store::SqliteCatalog;
pub use suggestion::{MatchOutcome, MatchReason, MatchSuggestion, SuggestionKind};
