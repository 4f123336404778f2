//! Error types emitted by the oshikatsu CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use oshikatsu_core::CatalogError;
use oshikatsu_matcher::{MatchConfigError, ReviewError};
use oshikatsu_sitemap::SitemapError;
use thiserror::Error;

/// Errors emitted by the oshikatsu CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Neither link target was supplied after configuration merging.
    #[error(
        "missing link target (set --{location} or {location_env} for a location, \
         --{item} or {item_env} for an item)"
    )]
    MissingTarget {
        location: &'static str,
        location_env: &'static str,
        item: &'static str,
        item_env: &'static str,
    },
    /// Both link targets were supplied after configuration merging.
    #[error("choose one of --location or --item, not both")]
    AmbiguousTarget,
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the matcher configuration file failed.
    #[error("failed to open match config at {path:?}: {source}")]
    OpenMatchConfig {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Matcher configuration JSON could not be decoded.
    #[error("failed to parse match config JSON at {path:?}: {source}")]
    ParseMatchConfig {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The merged matcher configuration failed validation.
    #[error("invalid match config: {0}")]
    InvalidMatchConfig(#[from] MatchConfigError),
    /// Opening or reading the catalogue failed.
    #[error("catalogue error: {0}")]
    Catalog(#[from] CatalogError),
    /// Preparing or acting on a review failed.
    #[error(transparent)]
    Review(#[from] ReviewError),
    /// Building the sitemap failed.
    #[error("failed to build sitemap: {0}")]
    Sitemap(#[from] SitemapError),
    /// Creating the sitemap output directory failed.
    #[error("failed to create output directory {path:?}: {source}")]
    CreateOutputDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing a sitemap file failed.
    #[error("failed to write sitemap file {path:?}: {source}")]
    WriteSitemap {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
