//! Test-only, in-memory catalogue used by unit and behaviour tests.

use std::sync::Mutex;

use crate::{
    CandidateSet, CatalogEntry, CatalogError, CatalogStore, EntityKind, Episode, EpisodeLink,
    Item, LinkStore, Location, SuggestionKind,
};

/// In-memory implementation of [`CatalogStore`] and [`LinkStore`].
///
/// Lookups are linear scans; the store is intended only for small fixtures.
/// Failure injection lets tests exercise the error paths of callers.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    episodes: Vec<Episode>,
    locations: Vec<(String, Location)>,
    items: Vec<(String, Item)>,
    links: Mutex<Vec<EpisodeLink>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryCatalog {
    /// Add an episode.
    #[must_use]
    pub fn with_episode(mut self, episode: Episode) -> Self {
        self.episodes.push(episode);
        self
    }

    /// Add a location owned by `celebrity_id`.
    #[must_use]
    pub fn with_location(mut self, celebrity_id: &str, location: Location) -> Self {
        self.locations.push((celebrity_id.to_owned(), location));
        self
    }

    /// Add an item owned by `celebrity_id`.
    #[must_use]
    pub fn with_item(mut self, celebrity_id: &str, item: Item) -> Self {
        self.items.push((celebrity_id.to_owned(), item));
        self
    }

    /// Pre-record a link without validation.
    #[must_use]
    pub fn with_link(self, link: EpisodeLink) -> Self {
        if let Ok(mut links) = self.links.lock() {
            links.push(link);
        }
        self
    }

    /// Make every read fail with [`CatalogError::Unavailable`].
    #[must_use]
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail with [`CatalogError::Unavailable`].
    #[must_use]
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Snapshot of the recorded links.
    pub fn links(&self) -> Vec<EpisodeLink> {
        self.links
            .lock()
            .map(|links| links.clone())
            .unwrap_or_default()
    }

    fn check_reads(&self, operation: &'static str) -> Result<(), CatalogError> {
        if self.fail_reads {
            Err(CatalogError::Unavailable { operation })
        } else {
            Ok(())
        }
    }

    fn entity_exists(&self, kind: SuggestionKind, entity_id: &str) -> bool {
        match kind {
            SuggestionKind::Location => self.locations.iter().any(|(_, l)| l.id == entity_id),
            SuggestionKind::Item => self.items.iter().any(|(_, i)| i.id == entity_id),
        }
    }
}

impl CatalogStore for MemoryCatalog {
    fn episode(&self, episode_id: &str) -> Result<Episode, CatalogError> {
        self.check_reads("read episode")?;
        self.episodes
            .iter()
            .find(|episode| episode.id == episode_id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownEpisode {
                episode_id: episode_id.to_owned(),
            })
    }

    fn candidates_for_celebrity(&self, celebrity_id: &str) -> Result<CandidateSet, CatalogError> {
        self.check_reads("read candidates")?;
        let locations = self
            .locations
            .iter()
            .filter(|(owner, _)| owner == celebrity_id)
            .map(|(_, location)| location.clone())
            .collect();
        let items = self
            .items
            .iter()
            .filter(|(owner, _)| owner == celebrity_id)
            .map(|(_, item)| item.clone())
            .collect();
        Ok(CandidateSet::new(locations, items))
    }

    fn links_for_episode(&self, episode_id: &str) -> Result<Vec<EpisodeLink>, CatalogError> {
        self.check_reads("read episode links")?;
        Ok(self
            .links()
            .into_iter()
            .filter(|link| link.episode_id == episode_id)
            .collect())
    }

    fn catalog_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.check_reads("list catalogue entries")?;
        let links = self.links();
        let count = |matches: &dyn Fn(&EpisodeLink) -> bool| {
            u32::try_from(links.iter().filter(|link| matches(link)).count()).unwrap_or(u32::MAX)
        };
        let entry = |kind, id: &str, link_count| CatalogEntry {
            kind,
            id: id.to_owned(),
            slug: id.to_owned(),
            updated_at: None,
            link_count,
        };
        let mut entries = Vec::new();
        for episode in &self.episodes {
            let link_count = count(&|link| link.episode_id == episode.id);
            entries.push(entry(EntityKind::Episode, &episode.id, link_count));
        }
        for (_, location) in &self.locations {
            let link_count = count(&|link| {
                link.target.kind() == SuggestionKind::Location
                    && link.target.entity_id() == location.id
            });
            entries.push(entry(EntityKind::Location, &location.id, link_count));
        }
        for (_, item) in &self.items {
            let link_count = count(&|link| {
                link.target.kind() == SuggestionKind::Item && link.target.entity_id() == item.id
            });
            entries.push(entry(EntityKind::Item, &item.id, link_count));
        }
        Ok(entries)
    }
}

impl LinkStore for MemoryCatalog {
    fn create_link(&self, link: &EpisodeLink) -> Result<(), CatalogError> {
        if self.fail_writes {
            return Err(CatalogError::Unavailable {
                operation: "create link",
            });
        }
        if !self.episodes.iter().any(|e| e.id == link.episode_id) {
            return Err(CatalogError::UnknownEpisode {
                episode_id: link.episode_id.clone(),
            });
        }
        let kind = link.target.kind();
        if !self.entity_exists(kind, link.target.entity_id()) {
            return Err(CatalogError::UnknownEntity {
                kind,
                entity_id: link.target.entity_id().to_owned(),
            });
        }
        let mut links = self.links.lock().map_err(|_| CatalogError::Unavailable {
            operation: "create link",
        })?;
        if links.contains(link) {
            return Err(CatalogError::DuplicateLink {
                episode_id: link.episode_id.clone(),
                kind,
                entity_id: link.target.entity_id().to_owned(),
            });
        }
        links.push(link.clone());
        Ok(())
    }
}
