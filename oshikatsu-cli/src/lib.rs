//! Command-line interface for the oshikatsu catalogue tooling.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod fs;
mod review;
mod sitemap;

pub use error::CliError;

use review::{AcceptArgs, SuggestArgs, run_accept, run_suggest};
use sitemap::{SitemapArgs, run_sitemap};

const ARG_EPISODE_ID: &str = "episode-id";
const ARG_CATALOG_DB: &str = "catalog-db";
const ARG_LIMIT: &str = "limit";
const ARG_THRESHOLD: &str = "threshold";
const ARG_MATCH_CONFIG: &str = "match-config";
const ARG_LOCATION: &str = "location";
const ARG_ITEM: &str = "item";
const ARG_BASE_URL: &str = "base-url";
const ARG_OUTPUT_DIR: &str = "output-dir";
const ARG_MAX_URLS: &str = "max-urls";
const ENV_SUGGEST_EPISODE_ID: &str = "OSHIKATSU_CMDS_SUGGEST_EPISODE_ID";
const ENV_ACCEPT_EPISODE_ID: &str = "OSHIKATSU_CMDS_ACCEPT_EPISODE_ID";
const ENV_ACCEPT_LOCATION: &str = "OSHIKATSU_CMDS_ACCEPT_LOCATION";
const ENV_ACCEPT_ITEM: &str = "OSHIKATSU_CMDS_ACCEPT_ITEM";
const ENV_SITEMAP_BASE_URL: &str = "OSHIKATSU_CMDS_SITEMAP_BASE_URL";
const DEFAULT_CATALOG_DB: &str = "catalog.db";
const DEFAULT_OUTPUT_DIR: &str = ".";

/// Run the oshikatsu CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Suggest(args) => run_suggest(args),
        Command::Accept(args) => run_accept(args),
        Command::Sitemap(args) => run_sitemap(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "oshikatsu",
    about = "Catalogue maintenance utilities for oshikatsu fan content",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Suggest locations and items mentioned by an episode.
    Suggest(SuggestArgs),
    /// Link an episode to one of its suggestions.
    Accept(AcceptArgs),
    /// Write sitemap files for the public catalogue.
    Sitemap(SitemapArgs),
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
