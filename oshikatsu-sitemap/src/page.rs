//! Public pages that appear in the sitemap.

use chrono::{DateTime, Utc};
use oshikatsu_core::{CatalogEntry, EntityKind};

/// Kind of public page; drives the base priority and default change
/// frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// The site root.
    Home,
    /// A celebrity profile.
    Celebrity,
    /// An episode page.
    Episode,
    /// A filming location page.
    Location,
    /// A fashion item page.
    Item,
    /// An informational page such as the privacy policy.
    Static,
}

impl PageKind {
    /// Base priority in hundredths.
    pub(crate) const fn base_priority(self) -> u32 {
        match self {
            Self::Home => 100,
            Self::Celebrity => 80,
            Self::Episode => 70,
            Self::Location | Self::Item => 60,
            Self::Static => 40,
        }
    }

    const fn collection(self) -> Option<&'static str> {
        match self {
            Self::Celebrity => Some("celebrities"),
            Self::Episode => Some("episodes"),
            Self::Location => Some("locations"),
            Self::Item => Some("items"),
            Self::Home | Self::Static => None,
        }
    }
}

impl From<EntityKind> for PageKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Celebrity => Self::Celebrity,
            EntityKind::Episode => Self::Episode,
            EntityKind::Location => Self::Location,
            EntityKind::Item => Self::Item,
        }
    }
}

/// One page to publish, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Kind of page.
    pub kind: PageKind,
    /// Path relative to the site root, e.g. `/episodes/harbour-vlog`.
    pub path: String,
    /// Last content change, when known.
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of episode links attached to the page's entity.
    pub link_count: u32,
}

impl PageRecord {
    /// The site root.
    #[must_use]
    pub fn home() -> Self {
        Self {
            kind: PageKind::Home,
            path: "/".to_owned(),
            updated_at: None,
            link_count: 0,
        }
    }

    /// An informational page at `path`.
    #[must_use]
    pub fn static_page(path: impl Into<String>) -> Self {
        Self {
            kind: PageKind::Static,
            path: path.into(),
            updated_at: None,
            link_count: 0,
        }
    }

    /// Attach a last-modified timestamp.
    #[must_use]
    pub const fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Map a catalogue listing row to its public page.
    ///
    /// # Examples
    /// ```
    /// use oshikatsu_core::{CatalogEntry, EntityKind};
    /// use oshikatsu_sitemap::PageRecord;
    ///
    /// let entry = CatalogEntry {
    ///     kind: EntityKind::Location,
    ///     id: "loc-1".into(),
    ///     slug: "joes-cafe".into(),
    ///     updated_at: None,
    ///     link_count: 3,
    /// };
    /// let page = PageRecord::from_entry(&entry);
    /// assert_eq!(page.path, "/locations/joes-cafe");
    /// assert_eq!(page.link_count, 3);
    /// ```
    #[must_use]
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        let kind = PageKind::from(entry.kind);
        let path = match kind.collection() {
            Some(collection) => format!("/{collection}/{}", entry.slug),
            None => format!("/{}", entry.slug),
        };
        Self {
            kind,
            path,
            updated_at: entry.updated_at,
            link_count: entry.link_count,
        }
    }
}

/// Assemble the full page list: home, every catalogue entry, then static
/// pages.
#[must_use]
pub fn page_records<'a, I>(entries: &[CatalogEntry], static_paths: I) -> Vec<PageRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    std::iter::once(PageRecord::home())
        .chain(entries.iter().map(PageRecord::from_entry))
        .chain(static_paths.into_iter().map(PageRecord::static_page))
        .collect()
}
