//! Catalogue records curated in the back office.
//!
//! Episodes supply the text the matcher searches; locations and items are the
//! candidates it links episodes to. All records are plain owned values so
//! callers can fetch a snapshot once and hand out borrowed views.

use chrono::{DateTime, Utc};

use crate::link::EpisodeLink;
use crate::suggestion::SuggestionKind;

/// A video episode featuring a celebrity.
///
/// # Examples
/// ```
/// use oshikatsu_core::Episode;
///
/// let episode = Episode::new("ep-1", "celeb-1", "Cafe hopping in Tokyo")
///     .with_description("Visiting a quiet cafe");
/// assert_eq!(episode.description.as_deref(), Some("Visiting a quiet cafe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Episode {
    pub id: String,
    pub celebrity_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Free-form curator notes, searched when no description exists.
    pub notes: Option<String>,
}

impl Episode {
    /// Construct an episode with a title and no body text.
    pub fn new(
        id: impl Into<String>,
        celebrity_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            celebrity_id: celebrity_id.into(),
            title: title.into(),
            description: None,
            notes: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach curator notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Body text used for matching: the description, or the notes when the
    /// description is missing or blank.
    pub fn body(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|description| !description.trim().is_empty())
            .or(self.notes.as_deref())
    }
}

/// A filming location.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl Location {
    /// Construct a location without address or tags.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            tags: Vec::new(),
        }
    }

    /// Attach a street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Replace the tag list.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A fashion item worn on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl Item {
    /// Construct an item without brand, category or tags.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: None,
            category: None,
            tags: Vec::new(),
        }
    }

    /// Attach a brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Attach a category such as "jacket" or "bag".
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Replace the tag list.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Borrowed view of a record the matcher can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    Location(&'a Location),
    Item(&'a Item),
}

impl Candidate<'_> {
    /// Kind of suggestion this candidate would produce.
    pub const fn kind(&self) -> SuggestionKind {
        match self {
            Self::Location(_) => SuggestionKind::Location,
            Self::Item(_) => SuggestionKind::Item,
        }
    }

    /// Identifier of the underlying record.
    pub fn id(&self) -> &str {
        match self {
            Self::Location(location) => &location.id,
            Self::Item(item) => &item.id,
        }
    }

    /// Display name of the underlying record.
    pub fn name(&self) -> &str {
        match self {
            Self::Location(location) => &location.name,
            Self::Item(item) => &item.name,
        }
    }
}

/// Locations and items fetched for one celebrity.
///
/// Order is preserved from the store; the matcher scores locations first and
/// items second, which fixes the merge order used to break ranking ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    pub locations: Vec<Location>,
    pub items: Vec<Item>,
}

impl CandidateSet {
    /// Build a set from pre-fetched lists.
    pub const fn new(locations: Vec<Location>, items: Vec<Item>) -> Self {
        Self { locations, items }
    }

    /// Total number of candidates.
    pub fn len(&self) -> usize {
        self.locations.len() + self.items.len()
    }

    /// Report whether the set holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.items.is_empty()
    }

    /// Iterate candidates in merge order: every location, then every item.
    pub fn iter(&self) -> impl Iterator<Item = Candidate<'_>> {
        self.locations
            .iter()
            .map(Candidate::Location)
            .chain(self.items.iter().map(Candidate::Item))
    }

    /// Drop candidates that already have a link in `links`.
    pub fn retain_unlinked(&mut self, links: &[EpisodeLink]) {
        let linked = |kind: SuggestionKind, id: &str| {
            links
                .iter()
                .any(|link| link.target.kind() == kind && link.target.entity_id() == id)
        };
        self.locations
            .retain(|location| !linked(SuggestionKind::Location, &location.id));
        self.items
            .retain(|item| !linked(SuggestionKind::Item, &item.id));
    }
}

/// Kinds of publicly addressable catalogue records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    Celebrity,
    Episode,
    Location,
    Item,
}

impl EntityKind {
    /// Return the kind as a lowercase `&str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celebrity => "celebrity",
            Self::Episode => "episode",
            Self::Location => "location",
            Self::Item => "item",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing row describing one published catalogue record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    pub kind: EntityKind,
    pub id: String,
    /// URL segment for the record; falls back to the identifier.
    pub slug: String,
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of related records (episodes for a celebrity, links otherwise).
    pub link_count: u32,
}
