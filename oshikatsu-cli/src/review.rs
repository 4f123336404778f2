//! `suggest` and `accept` command implementations.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use oshikatsu_core::{MatchSuggestion, SqliteCatalog, SuggestionKind};
use oshikatsu_matcher::{DEFAULT_DISPLAY_LIMIT, KeywordMatcher, MatchConfig, SuggestionReview};
use serde::{Deserialize, Serialize};

use crate::fs::open_utf8_file;
use crate::{
    ARG_CATALOG_DB, ARG_EPISODE_ID, ARG_ITEM, ARG_LIMIT, ARG_LOCATION, ARG_MATCH_CONFIG,
    ARG_THRESHOLD, CliError, DEFAULT_CATALOG_DB, ENV_ACCEPT_EPISODE_ID, ENV_ACCEPT_ITEM,
    ENV_ACCEPT_LOCATION, ENV_SUGGEST_EPISODE_ID, require_existing, write_json,
};

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "suggest",
    long_about = "Score the locations and items of an episode's celebrity \
                 against the episode's title and description, and print the \
                 ranked suggestions as JSON. Candidates already linked to the \
                 episode are skipped.",
    about = "Suggest locations and items for an episode"
)]
#[ortho_config(prefix = "OSHIKATSU")]
pub(crate) struct SuggestArgs {
    /// Identifier of the episode to match.
    #[arg(value_name = "episode-id")]
    #[serde(default)]
    pub(crate) episode_id: Option<String>,
    /// Path to the SQLite catalogue.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Maximum number of suggestions to print.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Minimum confidence for a suggestion, overriding the match config.
    #[arg(long = ARG_THRESHOLD, value_name = "x")]
    #[serde(default)]
    pub(crate) threshold: Option<f32>,
    /// JSON file with matcher weights, threshold and keyword tables.
    #[arg(long = ARG_MATCH_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) match_config: Option<Utf8PathBuf>,
}

/// CLI arguments for the `accept` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "accept",
    long_about = "Re-run the matcher for an episode and link it to one of \
                 the suggested entities. The entity must still be suggested \
                 under the active match configuration.",
    about = "Accept a suggestion and record the link"
)]
#[ortho_config(prefix = "OSHIKATSU")]
pub(crate) struct AcceptArgs {
    /// Identifier of the episode to link.
    #[arg(value_name = "episode-id")]
    #[serde(default)]
    pub(crate) episode_id: Option<String>,
    /// Identifier of the suggested location to link.
    #[arg(long = ARG_LOCATION, value_name = "id", conflicts_with = ARG_ITEM)]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Identifier of the suggested item to link.
    #[arg(long = ARG_ITEM, value_name = "id")]
    #[serde(default)]
    pub(crate) item: Option<String>,
    /// Path to the SQLite catalogue.
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Minimum confidence for a suggestion, overriding the match config.
    #[arg(long = ARG_THRESHOLD, value_name = "x")]
    #[serde(default)]
    pub(crate) threshold: Option<f32>,
    /// JSON file with matcher weights, threshold and keyword tables.
    #[arg(long = ARG_MATCH_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) match_config: Option<Utf8PathBuf>,
}

impl SuggestArgs {
    pub(crate) fn into_config(self) -> Result<SuggestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SuggestConfig::try_from(merged)
    }
}

impl AcceptArgs {
    pub(crate) fn into_config(self) -> Result<AcceptConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AcceptConfig::try_from(merged)
    }
}

/// Catalogue and matcher settings shared by `suggest` and `accept`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchOptions {
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) threshold: Option<f32>,
    pub(crate) match_config: Option<Utf8PathBuf>,
}

impl MatchOptions {
    fn new(
        catalog_db: Option<Utf8PathBuf>,
        threshold: Option<f32>,
        match_config: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            catalog_db: catalog_db.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG_DB)),
            threshold,
            match_config,
        }
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.catalog_db, ARG_CATALOG_DB)?;
        if let Some(path) = &self.match_config {
            require_existing(path, ARG_MATCH_CONFIG)?;
        }
        Ok(())
    }

    /// Build the matcher from the config file, if any, and the threshold
    /// override.
    pub(crate) fn matcher(&self) -> Result<KeywordMatcher, CliError> {
        let mut config = match &self.match_config {
            Some(path) => load_match_config(path)?,
            None => MatchConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        Ok(KeywordMatcher::new(config)?)
    }

    fn open_catalog(&self) -> Result<SqliteCatalog, CliError> {
        Ok(SqliteCatalog::open(self.catalog_db.as_std_path())?)
    }
}

/// Resolved `suggest` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SuggestConfig {
    pub(crate) episode_id: String,
    pub(crate) limit: usize,
    pub(crate) options: MatchOptions,
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let episode_id = args.episode_id.ok_or(CliError::MissingArgument {
            field: ARG_EPISODE_ID,
            env: ENV_SUGGEST_EPISODE_ID,
        })?;
        Ok(Self {
            episode_id,
            limit: args.limit.unwrap_or(DEFAULT_DISPLAY_LIMIT),
            options: MatchOptions::new(args.catalog_db, args.threshold, args.match_config),
        })
    }
}

/// Resolved `accept` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AcceptConfig {
    pub(crate) episode_id: String,
    pub(crate) kind: SuggestionKind,
    pub(crate) entity_id: String,
    pub(crate) options: MatchOptions,
}

impl TryFrom<AcceptArgs> for AcceptConfig {
    type Error = CliError;

    fn try_from(args: AcceptArgs) -> Result<Self, Self::Error> {
        let episode_id = args.episode_id.ok_or(CliError::MissingArgument {
            field: ARG_EPISODE_ID,
            env: ENV_ACCEPT_EPISODE_ID,
        })?;
        let (kind, entity_id) = match (args.location, args.item) {
            (Some(location), None) => (SuggestionKind::Location, location),
            (None, Some(item)) => (SuggestionKind::Item, item),
            (Some(_), Some(_)) => return Err(CliError::AmbiguousTarget),
            (None, None) => {
                return Err(CliError::MissingTarget {
                    location: ARG_LOCATION,
                    location_env: ENV_ACCEPT_LOCATION,
                    item: ARG_ITEM,
                    item_env: ENV_ACCEPT_ITEM,
                });
            }
        };
        Ok(Self {
            episode_id,
            kind,
            entity_id,
            options: MatchOptions::new(args.catalog_db, args.threshold, args.match_config),
        })
    }
}

/// Suggestion as printed by the CLI, with its display reason.
#[derive(Debug, Serialize)]
pub(crate) struct SuggestionView<'a> {
    #[serde(flatten)]
    suggestion: &'a MatchSuggestion,
    match_reason: String,
}

impl<'a> SuggestionView<'a> {
    pub(crate) fn new(suggestion: &'a MatchSuggestion) -> Self {
        Self {
            suggestion,
            match_reason: suggestion.match_reason(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SuggestReport<'a> {
    episode_id: &'a str,
    title: &'a str,
    suggestions: Vec<SuggestionView<'a>>,
}

pub(super) fn run_suggest(args: SuggestArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_suggest_with(args, &mut stdout)
}

pub(super) fn run_suggest_with(args: SuggestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.options.validate_sources()?;
    let review = prepare_review(&config.options, &config.episode_id, Some(config.limit))?;
    let report = SuggestReport {
        episode_id: &review.episode().id,
        title: &review.episode().title,
        suggestions: review.suggestions().iter().map(SuggestionView::new).collect(),
    };
    write_json(writer, &report)
}

pub(super) fn run_accept(args: AcceptArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_accept_with(args, &mut stdout)
}

pub(super) fn run_accept_with(args: AcceptArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.options.validate_sources()?;
    let catalog = config.options.open_catalog()?;
    let matcher = config.options.matcher()?;
    let mut review = SuggestionReview::prepare(&catalog, &config.episode_id, &matcher, None)?;
    let accepted = review.accept(&catalog, config.kind, &config.entity_id)?;
    write_json(writer, &SuggestionView::new(&accepted))
}

fn prepare_review(
    options: &MatchOptions,
    episode_id: &str,
    limit: Option<usize>,
) -> Result<SuggestionReview, CliError> {
    let catalog = options.open_catalog()?;
    let matcher = options.matcher()?;
    let review = SuggestionReview::prepare(&catalog, episode_id, &matcher, limit)?;
    debug!(
        "prepared {} suggestions for episode {episode_id}",
        review.suggestions().len()
    );
    Ok(review)
}

/// Loads a JSON-encoded [`MatchConfig`] from disk.
pub(super) fn load_match_config(path: &Utf8Path) -> Result<MatchConfig, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenMatchConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseMatchConfig {
        path: path.to_path_buf(),
        source,
    })
}
