//! Behavioural coverage for the SQLite catalogue store.

use std::cell::RefCell;

use oshikatsu_core::{
    CandidateSet, CatalogError, CatalogStore, EpisodeLink, LinkStore, LinkTarget, SqliteCatalog,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

const SEED_SQL: &str = "
INSERT INTO celebrities (id, name) VALUES ('c-1', 'Aoi'), ('c-2', 'Ren');
INSERT INTO episodes (id, celebrity_id, title, description)
    VALUES ('ep-1', 'c-1', 'Harbour cafe vlog', 'Coffee and a denim jacket');
INSERT INTO locations (id, celebrity_id, name, address, tags) VALUES
    ('loc-1', 'c-1', 'Joe''s Cafe', '123 Main St', '[\"coffee\"]'),
    ('loc-2', 'c-1', 'Harbour', NULL, '[]'),
    ('loc-3', 'c-2', 'Museum', NULL, '[]');
INSERT INTO items (id, celebrity_id, name, brand, category, tags) VALUES
    ('item-1', 'c-1', 'Denim jacket', 'Supreme', 'jacket', '[]');
";

/// Shared state for the catalogue scenarios.
pub struct CatalogWorld {
    dir: TempDir,
    catalog: RefCell<Option<SqliteCatalog>>,
    candidates: RefCell<Option<CandidateSet>>,
    last_write: RefCell<Option<Result<(), CatalogError>>>,
}

#[fixture]
/// Build an empty world for each scenario.
pub fn world() -> CatalogWorld {
    CatalogWorld {
        dir: TempDir::new().expect("create tempdir"),
        catalog: RefCell::new(None),
        candidates: RefCell::new(None),
        last_write: RefCell::new(None),
    }
}

fn with_catalog<T>(world: &CatalogWorld, f: impl FnOnce(&SqliteCatalog) -> T) -> T {
    let catalog = world.catalog.borrow();
    f(catalog.as_ref().expect("catalogue must be seeded"))
}

fn link(world: &CatalogWorld, target: LinkTarget) {
    let outcome = with_catalog(world, |catalog| {
        catalog.create_link(&EpisodeLink::new("ep-1", target))
    });
    *world.last_write.borrow_mut() = Some(outcome);
}

#[given("a seeded catalogue")]
fn seeded_catalogue(world: &CatalogWorld) {
    let path = world.dir.path().join("catalog.db");
    SqliteCatalog::create(&path).expect("create schema");
    rusqlite::Connection::open(&path)
        .expect("open for seeding")
        .execute_batch(SEED_SQL)
        .expect("seed rows");
    let catalog = SqliteCatalog::open(&path).expect("reopen catalogue");
    *world.catalog.borrow_mut() = Some(catalog);
}

#[when("I load the candidates for the first celebrity")]
fn load_candidates(world: &CatalogWorld) {
    let candidates = with_catalog(world, |catalog| {
        catalog.candidates_for_celebrity("c-1").expect("read candidates")
    });
    *world.candidates.borrow_mut() = Some(candidates);
}

#[when("I link the episode to the second location")]
fn link_second_location(world: &CatalogWorld) {
    link(world, LinkTarget::Location("loc-2".into()));
}

#[when("I link the episode to an unknown item")]
fn link_unknown_item(world: &CatalogWorld) {
    link(world, LinkTarget::Item("item-404".into()));
}

#[then("the locations and items come back in insertion order")]
fn candidates_in_order(world: &CatalogWorld) {
    let candidates = world.candidates.borrow();
    let candidates = candidates.as_ref().expect("candidates loaded");
    let location_ids: Vec<_> = candidates.locations.iter().map(|l| l.id.as_str()).collect();
    let item_ids: Vec<_> = candidates.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(location_ids, ["loc-1", "loc-2"]);
    assert_eq!(item_ids, ["item-1"]);
    assert_eq!(candidates.locations[0].tags, ["coffee"]);
}

#[then("the episode lists a link to the second location")]
fn episode_lists_link(world: &CatalogWorld) {
    let links = with_catalog(world, |catalog| {
        catalog.links_for_episode("ep-1").expect("read links")
    });
    assert_eq!(
        links,
        vec![EpisodeLink::new("ep-1", LinkTarget::Location("loc-2".into()))]
    );
}

#[then("the last write fails as a duplicate link")]
fn last_write_duplicate(world: &CatalogWorld) {
    let outcome = world.last_write.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(CatalogError::DuplicateLink { .. }))
    ));
}

#[then("the last write fails as an unknown entity")]
fn last_write_unknown(world: &CatalogWorld) {
    let outcome = world.last_write.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(CatalogError::UnknownEntity { .. }))
    ));
}

#[scenario(path = "tests/features/sqlite_catalog.feature", index = 0)]
fn candidates_in_insertion_order(world: CatalogWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_catalog.feature", index = 1)]
fn accepted_links_are_recorded(world: CatalogWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_catalog.feature", index = 2)]
fn duplicate_links_are_rejected(world: CatalogWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_catalog.feature", index = 3)]
fn unknown_items_are_rejected(world: CatalogWorld) {
    let _ = world;
}
