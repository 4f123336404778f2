//! Association records between episodes and catalogue entities.

use crate::suggestion::SuggestionKind;

/// Entity an episode is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "id", rename_all = "lowercase")
)]
pub enum LinkTarget {
    Location(String),
    Item(String),
}

impl LinkTarget {
    /// Build a target from a suggestion kind and an entity identifier.
    pub fn new(kind: SuggestionKind, entity_id: impl Into<String>) -> Self {
        match kind {
            SuggestionKind::Location => Self::Location(entity_id.into()),
            SuggestionKind::Item => Self::Item(entity_id.into()),
        }
    }

    /// Kind of the linked entity.
    pub const fn kind(&self) -> SuggestionKind {
        match self {
            Self::Location(_) => SuggestionKind::Location,
            Self::Item(_) => SuggestionKind::Item,
        }
    }

    /// Identifier of the linked entity.
    pub fn entity_id(&self) -> &str {
        match self {
            Self::Location(id) | Self::Item(id) => id,
        }
    }
}

/// A single "episode features entity" record.
///
/// # Examples
/// ```
/// use oshikatsu_core::{EpisodeLink, LinkTarget, SuggestionKind};
///
/// let link = EpisodeLink::new("ep-1", LinkTarget::Item("item-9".into()));
/// assert_eq!(link.target.kind(), SuggestionKind::Item);
/// assert_eq!(link.to_string(), "ep-1 -> item item-9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeLink {
    pub episode_id: String,
    pub target: LinkTarget,
}

impl EpisodeLink {
    /// Construct a link record.
    pub fn new(episode_id: impl Into<String>, target: LinkTarget) -> Self {
        Self {
            episode_id: episode_id.into(),
            target,
        }
    }
}

impl std::fmt::Display for EpisodeLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} {}",
            self.episode_id,
            self.target.kind(),
            self.target.entity_id()
        )
    }
}
