//! Behaviour-driven step definitions driving the review and sitemap commands.

use super::helpers::{CatalogFixture, SEEDED_PAGE_COUNT};
use super::*;
use crate::review::{AcceptArgs, SuggestArgs, run_accept_with, run_suggest_with};
use crate::sitemap::{SitemapArgs, run_sitemap_with};
use camino::Utf8PathBuf;
use chrono::{DateTime, TimeZone, Utc};
use oshikatsu_matcher::ReviewError;
use oshikatsu_sitemap::SitemapError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

const EPISODE: &str = "ep-1";

#[derive(Debug)]
struct CommandWorld {
    catalog: CatalogFixture,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            catalog: CatalogFixture::new(),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn output_dir(&self) -> Utf8PathBuf {
        self.catalog.root().join("public")
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn record(&self, run: impl FnOnce(&mut dyn std::io::Write) -> Result<(), CliError>) {
        let mut stdout = self.stdout.borrow_mut();
        stdout.clear();
        let writer: &mut dyn std::io::Write = &mut *stdout;
        let outcome = run(writer);
        self.result.replace(Some(outcome));
    }

    fn suggest(&self, limit: Option<usize>) {
        let args = SuggestArgs {
            episode_id: Some(EPISODE.into()),
            catalog_db: Some(self.catalog.db().to_path_buf()),
            limit,
            ..SuggestArgs::default()
        };
        self.record(|writer| run_suggest_with(args, writer));
    }

    fn accept_location(&self, location: &str) {
        let args = AcceptArgs {
            episode_id: Some(EPISODE.into()),
            location: Some(location.into()),
            catalog_db: Some(self.catalog.db().to_path_buf()),
            ..AcceptArgs::default()
        };
        self.record(|writer| run_accept_with(args, writer));
    }

    fn sitemap(&self, base_url: &str, max_urls: Option<usize>) {
        let args = SitemapArgs {
            base_url: Some(base_url.into()),
            catalog_db: Some(self.catalog.db().to_path_buf()),
            output_dir: Some(self.output_dir()),
            max_urls,
        };
        self.record(|writer| run_sitemap_with(args, Self::now(), writer));
    }

    fn expect_success(&self) {
        let borrowed = self.result.borrow();
        let outcome = borrowed.as_ref().expect("result recorded");
        assert!(outcome.is_ok(), "expected success, found {outcome:?}");
    }

    fn suggested_ids(&self) -> Vec<String> {
        self.expect_success();
        let report: Value =
            serde_json::from_slice(&self.stdout.borrow()).expect("stdout should be JSON");
        assert_eq!(report["episode_id"], EPISODE);
        report["suggestions"]
            .as_array()
            .expect("suggestions array")
            .iter()
            .map(|s| s["entity_id"].as_str().expect("entity id").to_owned())
            .collect()
    }

    fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output_dir().join(name).as_std_path())
            .expect("sitemap file written")
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("a seeded catalogue")]
fn seeded_catalogue(#[from(world)] world: &CommandWorld) {
    assert!(world.catalog.db().exists(), "expected the catalogue on disk");
}

#[when("I request suggestions for the cafe episode")]
fn request_suggestions(#[from(world)] world: &CommandWorld) {
    world.suggest(None);
}

#[when("I request one suggestion for the cafe episode")]
fn request_one_suggestion(#[from(world)] world: &CommandWorld) {
    world.suggest(Some(1));
}

#[when("I accept the cafe location")]
fn accept_cafe(#[from(world)] world: &CommandWorld) {
    world.accept_location("loc-1");
    world.expect_success();
    let accepted: Value =
        serde_json::from_slice(&world.stdout.borrow()).expect("stdout should be JSON");
    assert_eq!(accepted["entity_id"], "loc-1");
    assert_eq!(accepted["type"], "location");
}

#[when("I accept the museum location")]
fn accept_museum(#[from(world)] world: &CommandWorld) {
    world.accept_location("loc-2");
}

#[when("I write the sitemap")]
fn write_sitemap(#[from(world)] world: &CommandWorld) {
    world.sitemap("https://oshi.example", None);
}

#[when("I write the sitemap with at most four URLs per file")]
fn write_split_sitemap(#[from(world)] world: &CommandWorld) {
    world.sitemap("https://oshi.example", Some(4));
}

#[when("I write the sitemap for an FTP site")]
fn write_ftp_sitemap(#[from(world)] world: &CommandWorld) {
    world.sitemap("ftp://oshi.example", None);
}

#[then("the suggestions list the cafe before the jacket")]
fn cafe_before_jacket(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.suggested_ids(), ["loc-1", "item-1"]);
    let report: Value =
        serde_json::from_slice(&world.stdout.borrow()).expect("stdout should be JSON");
    assert_eq!(
        report["suggestions"][0]["match_reason"],
        "name match, tag: coffee, keyword: cafe, keyword: coffee"
    );
    assert_eq!(report["suggestions"][1]["matched_text"], "Denim jacket");
}

#[then("only the cafe is suggested")]
fn only_cafe(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.suggested_ids(), ["loc-1"]);
}

#[then("only the jacket is suggested")]
fn only_jacket(#[from(world)] world: &CommandWorld) {
    assert_eq!(world.suggested_ids(), ["item-1"]);
}

#[then("the command fails because the museum was not suggested")]
fn museum_not_suggested(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    assert!(
        matches!(
            error,
            CliError::Review(ReviewError::NotSuggested { entity_id, .. }) if entity_id == "loc-2"
        ),
        "unexpected error {error:?}"
    );
}

#[then("one sitemap file lists every page")]
fn single_sitemap(#[from(world)] world: &CommandWorld) {
    world.expect_success();
    let sitemap = world.read_output("sitemap.xml");
    assert_eq!(sitemap.matches("<url>").count(), SEEDED_PAGE_COUNT);
    assert!(sitemap.contains("<loc>https://oshi.example/items/denim-jacket</loc>"));
    assert!(sitemap.contains("<loc>https://oshi.example/celebrities/aoi</loc>"));
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("utf-8 stdout");
    assert_eq!(stdout.lines().count(), 1);
}

#[then("numbered sitemap files sit behind an index")]
fn split_sitemap(#[from(world)] world: &CommandWorld) {
    world.expect_success();
    let total: usize = ["sitemap-1.xml", "sitemap-2.xml", "sitemap-3.xml"]
        .iter()
        .map(|name| world.read_output(name).matches("<url>").count())
        .sum();
    assert_eq!(total, SEEDED_PAGE_COUNT);
    let index = world.read_output("sitemap.xml");
    assert!(index.contains("<sitemapindex"));
    assert_eq!(index.matches("<sitemap>").count(), 3);
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("utf-8 stdout");
    assert_eq!(stdout.lines().count(), 4);
}

#[then("the command fails because the base URL is unsupported")]
fn unsupported_base(#[from(world)] world: &CommandWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    assert!(
        matches!(
            error,
            CliError::Sitemap(SitemapError::UnsupportedBaseUrl { .. })
        ),
        "unexpected error {error:?}"
    );
    assert!(!world.output_dir().exists(), "no output should be written");
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $path:literal, $scenario_title:literal) => {
        #[scenario(path = $path, name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(
    suggest_lists_ranked,
    "tests/features/review_command.feature",
    "listing ranked suggestions for an episode"
);
register_command_scenario!(
    suggest_honours_limit,
    "tests/features/review_command.feature",
    "limiting the number of suggestions"
);
register_command_scenario!(
    accept_hides_linked,
    "tests/features/review_command.feature",
    "accepting a suggestion hides it from later runs"
);
register_command_scenario!(
    accept_rejects_unsuggested,
    "tests/features/review_command.feature",
    "rejecting an entity that was not suggested"
);
register_command_scenario!(
    sitemap_single_file,
    "tests/features/sitemap_command.feature",
    "writing a single sitemap"
);
register_command_scenario!(
    sitemap_split_files,
    "tests/features/sitemap_command.feature",
    "splitting a sitemap behind an index"
);
register_command_scenario!(
    sitemap_rejects_ftp,
    "tests/features/sitemap_command.feature",
    "rejecting an unusable base URL"
);
