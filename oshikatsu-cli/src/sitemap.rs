//! `sitemap` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use oshikatsu_core::{CatalogStore, SqliteCatalog};
use oshikatsu_sitemap::{
    DEFAULT_STATIC_PATHS, MAX_URLS_PER_FILE, SitemapConfig, SitemapGenerator, page_records,
};
use serde::{Deserialize, Serialize};

use crate::fs::create_output_dir;
use crate::{
    ARG_BASE_URL, ARG_CATALOG_DB, ARG_MAX_URLS, ARG_OUTPUT_DIR, CliError, DEFAULT_CATALOG_DB,
    DEFAULT_OUTPUT_DIR, ENV_SITEMAP_BASE_URL, require_existing,
};

/// CLI arguments for the `sitemap` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "sitemap",
    long_about = "Score every published catalogue page and write \
                 sitemap.xml into the output directory. Large catalogues \
                 are split into numbered files behind a sitemap index.",
    about = "Write sitemap files for the public catalogue"
)]
#[ortho_config(prefix = "OSHIKATSU")]
pub(crate) struct SitemapArgs {
    /// Public base URL of the site, e.g. `https://oshi.example`.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Path to the SQLite catalogue.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Directory receiving the sitemap files.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Maximum URLs per sitemap file.
    #[arg(long = ARG_MAX_URLS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_urls: Option<usize>,
}

impl SitemapArgs {
    pub(crate) fn into_config(self) -> Result<SitemapCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SitemapCommandConfig::try_from(merged)
    }
}

/// Resolved `sitemap` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SitemapCommandConfig {
    pub(crate) base_url: String,
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) sitemap: SitemapConfig,
}

impl TryFrom<SitemapArgs> for SitemapCommandConfig {
    type Error = CliError;

    fn try_from(args: SitemapArgs) -> Result<Self, Self::Error> {
        let base_url = args.base_url.ok_or(CliError::MissingArgument {
            field: ARG_BASE_URL,
            env: ENV_SITEMAP_BASE_URL,
        })?;
        Ok(Self {
            base_url,
            catalog_db: args
                .catalog_db
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG_DB)),
            output_dir: args
                .output_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR)),
            sitemap: SitemapConfig::default()
                .with_max_urls_per_file(args.max_urls.unwrap_or(MAX_URLS_PER_FILE)),
        })
    }
}

pub(super) fn run_sitemap(args: SitemapArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_sitemap_with(args, Utc::now(), &mut stdout)
}

/// Build and write the sitemap, printing one written path per line.
pub(super) fn run_sitemap_with(
    args: SitemapArgs,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.catalog_db, ARG_CATALOG_DB)?;
    let generator = SitemapGenerator::new(&config.base_url, config.sitemap)?;

    let catalog = SqliteCatalog::open(config.catalog_db.as_std_path())?;
    let entries = catalog.catalog_entries()?;
    let pages = page_records(&entries, DEFAULT_STATIC_PATHS.iter().copied());
    let files = generator.generate(&pages, now)?;

    let dir = create_output_dir(&config.output_dir).map_err(|source| {
        CliError::CreateOutputDir {
            path: config.output_dir.clone(),
            source,
        }
    })?;
    for file in &files {
        let path = config.output_dir.join(&file.name);
        dir.write(&file.name, file.contents.as_bytes())
            .map_err(|source| CliError::WriteSitemap {
                path: path.clone(),
                source,
            })?;
        writeln!(writer, "{path}").map_err(CliError::WriteOutput)?;
    }
    info!(
        "wrote {} sitemap file(s) covering {} pages",
        files.len(),
        pages.len()
    );
    Ok(())
}
