//! Operator review of suggestions for a single episode.
//!
//! [`SuggestionReview`] ties the catalogue store to the matcher: it loads the
//! episode and its celebrity's candidates, drops candidates already linked to
//! the episode, and ranks the rest. Accepting a suggestion writes exactly one
//! link and only then removes the suggestion from the list.

use log::{debug, error, info};
use oshikatsu_core::{
    CatalogError, CatalogStore, Episode, EpisodeLink, LinkStore, LinkTarget, MatchSuggestion,
    Matcher, SearchCorpus, SuggestionKind,
};
use thiserror::Error;

use crate::rank_suggestions;

/// Errors raised while preparing or acting on a review.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Reading the episode, its candidates or its links failed.
    #[error("failed to load suggestions for episode {episode_id}")]
    Load {
        /// Episode under review.
        episode_id: String,
        /// Source error from the catalogue store.
        #[source]
        source: CatalogError,
    },
    /// The requested entity is not among the current suggestions.
    #[error("{kind} {entity_id} is not suggested for episode {episode_id}")]
    NotSuggested {
        /// Episode under review.
        episode_id: String,
        /// Kind of the requested entity.
        kind: SuggestionKind,
        /// Identifier of the requested entity.
        entity_id: String,
    },
    /// Writing the link failed; the suggestion stays in the list.
    #[error("failed to link episode {episode_id} to {kind} {entity_id}")]
    Link {
        /// Episode under review.
        episode_id: String,
        /// Kind of the entity being linked.
        kind: SuggestionKind,
        /// Identifier of the entity being linked.
        entity_id: String,
        /// Source error from the link store.
        #[source]
        source: CatalogError,
    },
}

/// Ranked suggestions for one episode, awaiting operator decisions.
#[derive(Debug, Clone)]
pub struct SuggestionReview {
    episode: Episode,
    suggestions: Vec<MatchSuggestion>,
}

impl SuggestionReview {
    /// Load an episode and rank the unlinked candidates of its celebrity.
    ///
    /// # Errors
    /// Returns [`ReviewError::Load`] when the episode is unknown or any store
    /// read fails.
    pub fn prepare<S, M>(
        store: &S,
        episode_id: &str,
        matcher: &M,
        limit: Option<usize>,
    ) -> Result<Self, ReviewError>
    where
        S: CatalogStore + ?Sized,
        M: Matcher + ?Sized,
    {
        let load = |source| ReviewError::Load {
            episode_id: episode_id.to_owned(),
            source,
        };
        let episode = store.episode(episode_id).map_err(load)?;
        let mut candidates = store
            .candidates_for_celebrity(&episode.celebrity_id)
            .map_err(load)?;
        let links = store.links_for_episode(episode_id).map_err(load)?;
        let before = candidates.len();
        candidates.retain_unlinked(&links);
        debug!(
            "episode {episode_id}: {} candidates, {} already linked",
            candidates.len(),
            before.saturating_sub(candidates.len())
        );

        let corpus = SearchCorpus::from_episode(&episode);
        let suggestions = rank_suggestions(matcher.collect_matches(&corpus, &candidates), limit);
        Ok(Self {
            episode,
            suggestions,
        })
    }

    /// Episode under review.
    #[must_use]
    pub const fn episode(&self) -> &Episode {
        &self.episode
    }

    /// Pending suggestions in ranked order.
    #[must_use]
    pub fn suggestions(&self) -> &[MatchSuggestion] {
        &self.suggestions
    }

    /// Report whether no suggestions remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Link the episode to a suggested entity and drop the suggestion.
    ///
    /// Issues exactly one write. The suggestion is removed only after the
    /// write succeeds.
    ///
    /// # Errors
    /// Returns [`ReviewError::NotSuggested`] when the entity is not pending,
    /// and [`ReviewError::Link`] when the write fails.
    pub fn accept<L>(
        &mut self,
        links: &L,
        kind: SuggestionKind,
        entity_id: &str,
    ) -> Result<MatchSuggestion, ReviewError>
    where
        L: LinkStore + ?Sized,
    {
        let position = self.position(kind, entity_id)?;
        let link = EpisodeLink::new(self.episode.id.clone(), LinkTarget::new(kind, entity_id));
        if let Err(source) = links.create_link(&link) {
            error!("failed to record link {link}: {source}");
            return Err(ReviewError::Link {
                episode_id: self.episode.id.clone(),
                kind,
                entity_id: entity_id.to_owned(),
                source,
            });
        }
        info!("linked {link}");
        Ok(self.suggestions.remove(position))
    }

    /// Drop a suggestion without writing anything.
    ///
    /// # Errors
    /// Returns [`ReviewError::NotSuggested`] when the entity is not pending.
    pub fn dismiss(
        &mut self,
        kind: SuggestionKind,
        entity_id: &str,
    ) -> Result<MatchSuggestion, ReviewError> {
        let position = self.position(kind, entity_id)?;
        Ok(self.suggestions.remove(position))
    }

    fn position(&self, kind: SuggestionKind, entity_id: &str) -> Result<usize, ReviewError> {
        self.suggestions
            .iter()
            .position(|suggestion| suggestion.targets(kind, entity_id))
            .ok_or_else(|| ReviewError::NotSuggested {
                episode_id: self.episode.id.clone(),
                kind,
                entity_id: entity_id.to_owned(),
            })
    }
}
