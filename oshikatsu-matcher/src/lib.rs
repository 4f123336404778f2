//! Episode-to-catalogue auto-matching for the oshikatsu back office.
//!
//! The crate provides the pieces between an episode's text and the operator's
//! decision:
//! - **Candidate scoring** with [`KeywordMatcher`], which implements the
//!   [`Matcher`](oshikatsu_core::Matcher) trait by summing the weights of
//!   case-insensitive substring rules (name, address, brand, category, tags,
//!   and generic domain keywords) and keeping candidates that reach the
//!   configured threshold.
//! - **Ranking** with [`rank_suggestions`], a stable descending sort by
//!   confidence with an optional display limit.
//! - **Review** with [`SuggestionReview`], which loads an episode and its
//!   celebrity's unlinked candidates from a
//!   [`CatalogStore`](oshikatsu_core::CatalogStore) and writes one link per
//!   accepted suggestion.
//!
//! Scores are heuristic rankings, not probabilities.
//!
//! # Examples
//!
//! ```
//! use oshikatsu_core::{CandidateSet, Location, SearchCorpus};
//! use oshikatsu_matcher::{DEFAULT_DISPLAY_LIMIT, KeywordMatcher};
//!
//! let candidates = CandidateSet::new(
//!     vec![Location::new("loc-1", "Joe's Cafe").with_tags(["coffee"])],
//!     Vec::new(),
//! );
//! let corpus = SearchCorpus::normalize(
//!     Some("visited a nice cafe today, coffee was great"),
//!     None,
//! );
//! let ranked = KeywordMatcher::default().suggest(&corpus, &candidates, Some(DEFAULT_DISPLAY_LIMIT));
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0].match_reason(), "tag: coffee, keyword: cafe, keyword: coffee");
//! ```

#![forbid(unsafe_code)]

mod error;
mod keywords;
mod ranker;
mod review;
mod rules;
mod weights;

pub use error::MatchConfigError;
pub use keywords::KeywordTable;
pub use ranker::{DEFAULT_DISPLAY_LIMIT, rank_suggestions};
pub use review::{ReviewError, SuggestionReview};
pub use rules::KeywordMatcher;
pub use weights::{DEFAULT_THRESHOLD, ItemWeights, LocationWeights, MatchConfig};
