#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the reference matching scenarios.

use std::cell::RefCell;

use oshikatsu_core::{CandidateSet, Item, Location, MatchSuggestion, SearchCorpus, SuggestionKind};
use oshikatsu_matcher::{DEFAULT_DISPLAY_LIMIT, KeywordMatcher};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Episode text, candidates and the resulting suggestions.
pub struct MatchWorld {
    corpus: RefCell<SearchCorpus>,
    candidates: RefCell<CandidateSet>,
    suggestions: RefCell<Vec<MatchSuggestion>>,
}

#[fixture]
/// Start each scenario with an empty episode and catalogue.
pub fn world() -> MatchWorld {
    MatchWorld {
        corpus: RefCell::new(SearchCorpus::default()),
        candidates: RefCell::new(CandidateSet::default()),
        suggestions: RefCell::new(Vec::new()),
    }
}

fn set_title(world: &MatchWorld, title: &str) {
    *world.corpus.borrow_mut() = SearchCorpus::normalize(Some(title), None);
}

fn only_suggestion(world: &MatchWorld) -> MatchSuggestion {
    let suggestions = world.suggestions.borrow();
    assert_eq!(suggestions.len(), 1, "expected exactly one suggestion");
    suggestions.first().cloned().expect("one suggestion")
}

#[expect(
    clippy::float_arithmetic,
    reason = "approximate comparison of summed weights"
)]
fn assert_confidence(suggestion: &MatchSuggestion, expected: f32) {
    assert!(
        (suggestion.confidence - expected).abs() < 1e-5,
        "expected confidence {expected}, got {}",
        suggestion.confidence
    );
}

#[given("an episode titled supreme denim jacket review")]
fn supreme_episode(world: &MatchWorld) {
    set_title(world, "supreme denim jacket review");
}

#[given("an episode about a short walk downtown")]
fn walk_episode(world: &MatchWorld) {
    set_title(world, "a short walk downtown");
}

#[given("an episode about visiting a nice cafe")]
fn cafe_episode(world: &MatchWorld) {
    set_title(world, "visited a nice cafe today");
}

#[given("an episode about a nice cafe with great coffee")]
fn coffee_episode(world: &MatchWorld) {
    set_title(world, "visited a nice cafe today, coffee was great");
}

#[given("a Supreme denim jacket in the catalogue")]
fn supreme_jacket(world: &MatchWorld) {
    world
        .candidates
        .borrow_mut()
        .items
        .push(Item::new("item-1", "デニムジャケット").with_brand("Supreme"));
}

#[given("Joe's Cafe with a coffee tag in the catalogue")]
fn joes_cafe(world: &MatchWorld) {
    world.candidates.borrow_mut().locations.push(
        Location::new("loc-1", "Joe's Cafe")
            .with_address("123 Main St")
            .with_tags(["coffee"]),
    );
}

#[when("the episode is matched")]
fn run_matcher(world: &MatchWorld) {
    let suggestions = KeywordMatcher::default().suggest(
        &world.corpus.borrow(),
        &world.candidates.borrow(),
        Some(DEFAULT_DISPLAY_LIMIT),
    );
    *world.suggestions.borrow_mut() = suggestions;
}

#[then("the item is suggested with confidence 0.8")]
fn item_suggested(world: &MatchWorld) {
    let suggestion = only_suggestion(world);
    assert_eq!(suggestion.kind, SuggestionKind::Item);
    assert_confidence(&suggestion, 0.8);
}

#[then("the matched text is the brand")]
fn matched_brand(world: &MatchWorld) {
    assert_eq!(only_suggestion(world).matched_text.as_deref(), Some("Supreme"));
}

#[then("nothing is suggested")]
fn nothing_suggested(world: &MatchWorld) {
    assert!(world.suggestions.borrow().is_empty());
}

#[then("the cafe is suggested with confidence 0.5")]
fn cafe_suggested(world: &MatchWorld) {
    let suggestion = only_suggestion(world);
    assert_eq!(suggestion.entity_id, "loc-1");
    assert_confidence(&suggestion, 0.5);
}

#[then("the reasons read tag then both keywords")]
fn reasons_in_order(world: &MatchWorld) {
    assert_eq!(
        only_suggestion(world).match_reason(),
        "tag: coffee, keyword: cafe, keyword: coffee"
    );
}

#[scenario(path = "tests/features/auto_match.feature", index = 0)]
fn brand_in_title(world: MatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/auto_match.feature", index = 1)]
fn unrelated_text(world: MatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/auto_match.feature", index = 2)]
fn single_keyword(world: MatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/auto_match.feature", index = 3)]
fn tag_and_keywords(world: MatchWorld) {
    let _ = world;
}
