//! Facade crate for the oshikatsu catalogue engine.
//!
//! This crate re-exports the core catalogue types, the keyword matcher and
//! its review workflow, and optionally the SQLite store and sitemap
//! generator behind feature flags.
//!
//! ```
//! use oshikatsu_engine::{Episode, KeywordMatcher, Location, SearchCorpus};
//!
//! let episode = Episode::new("ep-1", "celeb-1", "Morning at Joe's Cafe");
//! let corpus = SearchCorpus::from_episode(&episode);
//! let location = Location::new("loc-1", "Joe's Cafe");
//! let suggestion = KeywordMatcher::default()
//!     .score_location(&corpus, &location)
//!     .expect("name match clears the threshold");
//! assert_eq!(suggestion.entity_id, "loc-1");
//! ```

#![forbid(unsafe_code)]

pub use oshikatsu_core::{
    Candidate, CandidateSet, CatalogEntry, CatalogError, CatalogStore, EntityKind, Episode,
    EpisodeLink, Item, LinkStore, LinkTarget, Location, MatchOutcome, MatchReason,
    MatchSuggestion, Matcher, SearchCorpus, SuggestionKind,
};

#[cfg(feature = "store-sqlite")]
pub use oshikatsu_core::SqliteCatalog;

pub use oshikatsu_matcher::{
    DEFAULT_DISPLAY_LIMIT, DEFAULT_THRESHOLD, ItemWeights, KeywordMatcher, KeywordTable,
    LocationWeights, MatchConfig, MatchConfigError, ReviewError, SuggestionReview,
    rank_suggestions,
};

#[cfg(feature = "sitemap")]
pub use oshikatsu_sitemap::{
    ChangeFreq, PageKind, PageRecord, Priority, SitemapConfig, SitemapEntry, SitemapError,
    SitemapFile, SitemapGenerator, page_records,
};
