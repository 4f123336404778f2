//! Error types raised while generating sitemaps.

use thiserror::Error;

/// Errors raised while building sitemap URLs or splitting output files.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The base URL could not be parsed.
    #[error("invalid base URL {url}")]
    InvalidBaseUrl {
        /// Base URL as supplied.
        url: String,
        /// Source error from `url`.
        #[source]
        source: url::ParseError,
    },
    /// The base URL parsed but cannot host relative paths.
    #[error("base URL {url} must be an absolute http or https URL")]
    UnsupportedBaseUrl {
        /// Base URL as supplied.
        url: String,
    },
    /// A page path could not be joined onto the base URL.
    #[error("failed to join page path {path} onto the base URL")]
    JoinPath {
        /// Offending page path.
        path: String,
        /// Source error from `url`.
        #[source]
        source: url::ParseError,
    },
    /// A page path resolved outside the base URL.
    #[error("page path {path} resolves outside the base URL")]
    ForeignPath {
        /// Offending page path.
        path: String,
    },
    /// The per-file URL limit was zero or above the sitemap protocol limit.
    #[error("max URLs per file must be within 1..={max}, got {value}")]
    InvalidMaxUrls {
        /// Value supplied.
        value: usize,
        /// Protocol maximum.
        max: usize,
    },
}
