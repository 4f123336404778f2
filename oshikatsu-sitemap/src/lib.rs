//! Sitemap generation for the public oshikatsu catalogue.
//!
//! Pages are scored from their kind, their last update and the number of
//! episodes linked to them:
//! - **Priority** starts from a per-kind base, gains a freshness bonus for
//!   recent updates and an engagement bonus for linked episodes, and is
//!   clamped into `0.1..=1.0` with one decimal place.
//! - **Change frequency** follows the age of the last update, falling back to
//!   a per-kind default for undated pages.
//!
//! [`SitemapGenerator`] joins page paths onto the site's base URL, drops
//! duplicate URLs, orders entries by priority, and renders sitemaps.org 0.9
//! documents. Output larger than the per-file limit is split into numbered
//! files behind a `sitemap.xml` index. Rendering is pure; callers decide
//! where the files go.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use oshikatsu_sitemap::{PageRecord, SitemapConfig, SitemapGenerator};
//!
//! let generator = SitemapGenerator::new("https://oshi.example", SitemapConfig::default())
//!     .expect("valid base URL");
//! let pages = [PageRecord::home(), PageRecord::static_page("/about")];
//! let files = generator.generate(&pages, Utc::now()).expect("generate sitemap");
//! assert_eq!(files.len(), 1);
//! assert_eq!(files[0].name, "sitemap.xml");
//! assert!(files[0].contents.contains("<loc>https://oshi.example/about</loc>"));
//! ```

#![forbid(unsafe_code)]

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use url::Url;

mod error;
mod page;
mod priority;
mod xml;

pub use error::SitemapError;
pub use page::{PageKind, PageRecord, page_records};
pub use priority::{ChangeFreq, Priority, change_freq, priority};

/// Protocol limit on URLs per sitemap file.
pub const MAX_URLS_PER_FILE: usize = 50_000;
/// Name of the single sitemap or of the index when output is split.
pub const SITEMAP_FILE_NAME: &str = "sitemap.xml";
/// Informational pages published alongside the catalogue.
pub const DEFAULT_STATIC_PATHS: &[&str] = &["/about", "/contact", "/privacy", "/terms"];

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitemapConfig {
    /// Maximum `<url>` entries per file, within `1..=50_000`.
    pub max_urls_per_file: usize,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            max_urls_per_file: MAX_URLS_PER_FILE,
        }
    }
}

impl SitemapConfig {
    /// Replace the per-file limit.
    #[must_use]
    pub const fn with_max_urls_per_file(mut self, max_urls_per_file: usize) -> Self {
        self.max_urls_per_file = max_urls_per_file;
        self
    }

    /// Validate the configuration and return it unchanged.
    ///
    /// # Errors
    /// Returns [`SitemapError::InvalidMaxUrls`] when the limit is zero or
    /// above [`MAX_URLS_PER_FILE`].
    pub const fn validate(self) -> Result<Self, SitemapError> {
        if self.max_urls_per_file == 0 || self.max_urls_per_file > MAX_URLS_PER_FILE {
            return Err(SitemapError::InvalidMaxUrls {
                value: self.max_urls_per_file,
                max: MAX_URLS_PER_FILE,
            });
        }
        Ok(self)
    }
}

/// A scored `<url>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Absolute page URL.
    pub loc: Url,
    /// Date of the last update, when known.
    pub lastmod: Option<NaiveDate>,
    /// Expected change frequency.
    pub changefreq: ChangeFreq,
    /// Relative priority.
    pub priority: Priority,
}

/// A rendered sitemap document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapFile {
    /// File name relative to the output directory.
    pub name: String,
    /// XML document.
    pub contents: String,
}

/// Builds sitemap documents for one site.
#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    base: Url,
    config: SitemapConfig,
}

impl SitemapGenerator {
    /// Create a generator for the site rooted at `base_url`.
    ///
    /// A trailing slash is added to the base path so page paths nest under
    /// it; query and fragment are dropped.
    ///
    /// # Errors
    /// Returns [`SitemapError::InvalidBaseUrl`] or
    /// [`SitemapError::UnsupportedBaseUrl`] for unusable base URLs and
    /// [`SitemapError::InvalidMaxUrls`] for an invalid configuration.
    pub fn new(base_url: &str, config: SitemapConfig) -> Result<Self, SitemapError> {
        let validated = config.validate()?;
        let mut base = Url::parse(base_url).map_err(|source| SitemapError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source,
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(SitemapError::UnsupportedBaseUrl {
                url: base_url.to_owned(),
            });
        }
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let nested = format!("{}/", base.path());
            base.set_path(&nested);
        }
        Ok(Self {
            base,
            config: validated,
        })
    }

    /// Normalised base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a page path against the base URL.
    ///
    /// # Errors
    /// Returns [`SitemapError::JoinPath`] when the path cannot be parsed and
    /// [`SitemapError::ForeignPath`] when it resolves outside the base.
    pub fn page_url(&self, path: &str) -> Result<Url, SitemapError> {
        let joined = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|source| SitemapError::JoinPath {
                path: path.to_owned(),
                source,
            })?;
        if !joined.as_str().starts_with(self.base.as_str()) {
            return Err(SitemapError::ForeignPath {
                path: path.to_owned(),
            });
        }
        Ok(joined)
    }

    /// Score pages and order them by priority, then URL.
    ///
    /// Pages that resolve to an already-seen URL are dropped with a warning.
    ///
    /// # Errors
    /// Propagates [`SitemapGenerator::page_url`] failures.
    pub fn entries(
        &self,
        records: &[PageRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<SitemapEntry>, SitemapError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let loc = self.page_url(&record.path)?;
            if !seen.insert(loc.as_str().to_owned()) {
                warn!("dropping duplicate sitemap URL {loc}");
                continue;
            }
            entries.push(SitemapEntry {
                loc,
                lastmod: record.updated_at.map(|at| at.date_naive()),
                changefreq: change_freq(record, now),
                priority: priority(record, now),
            });
        }
        entries.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.loc.as_str().cmp(b.loc.as_str()))
        });
        Ok(entries)
    }

    /// Render entries into one sitemap, or numbered sitemaps plus an index.
    ///
    /// # Errors
    /// Returns [`SitemapError::JoinPath`] if a numbered file name cannot be
    /// joined onto the base URL.
    pub fn render(
        &self,
        entries: &[SitemapEntry],
        now: DateTime<Utc>,
    ) -> Result<Vec<SitemapFile>, SitemapError> {
        if entries.len() <= self.config.max_urls_per_file {
            debug!("rendering {} URLs into {SITEMAP_FILE_NAME}", entries.len());
            return Ok(vec![SitemapFile {
                name: SITEMAP_FILE_NAME.to_owned(),
                contents: xml::render_urlset(entries),
            }]);
        }

        let mut files = Vec::new();
        let mut locations = Vec::new();
        for (index, chunk) in entries.chunks(self.config.max_urls_per_file).enumerate() {
            let name = format!("sitemap-{}.xml", index.saturating_add(1));
            debug!("rendering {} URLs into {name}", chunk.len());
            locations.push(self.page_url(&name)?);
            files.push(SitemapFile {
                name,
                contents: xml::render_urlset(chunk),
            });
        }
        files.push(SitemapFile {
            name: SITEMAP_FILE_NAME.to_owned(),
            contents: xml::render_index(&locations, now.date_naive()),
        });
        Ok(files)
    }

    /// Score, order and render `records`.
    ///
    /// # Errors
    /// Propagates [`SitemapGenerator::entries`] and
    /// [`SitemapGenerator::render`] failures.
    pub fn generate(
        &self,
        records: &[PageRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<SitemapFile>, SitemapError> {
        let entries = self.entries(records, now)?;
        self.render(&entries, now)
    }
}

#[cfg(test)]
mod tests;
