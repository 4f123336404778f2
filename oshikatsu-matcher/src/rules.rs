//! Rule-based evaluation of locations and items.
//!
//! Each rule is a case-insensitive substring test against the episode corpus.
//! Weights of the rules that fire are summed, clamped to `1.0`, and compared
//! with the inclusion threshold.

use log::{debug, warn};
use oshikatsu_core::{
    Candidate, CandidateSet, Item, Location, MatchOutcome, MatchReason, MatchSuggestion, Matcher,
    SearchCorpus,
};

use crate::{KeywordTable, MatchConfig, MatchConfigError, rank_suggestions};

/// Slack applied to the threshold comparison so accumulated rounding on `f32`
/// sums such as `0.1 + 0.1 + 0.1` still meets a `0.3` threshold.
const THRESHOLD_TOLERANCE: f32 = 1e-6;

/// Running total for one candidate.
#[derive(Debug, Default)]
struct Tally {
    raw: f32,
    reasons: Vec<MatchReason>,
    matched_text: Option<String>,
}

impl Tally {
    #[expect(
        clippy::float_arithmetic,
        reason = "confidence is the sum of fired rule weights"
    )]
    fn add(&mut self, weight: f32, reason: MatchReason) {
        self.raw += weight;
        self.reasons.push(reason);
    }

    fn tags(&mut self, corpus: &SearchCorpus, tags: &[String], weight: f32) {
        for tag in tags {
            if corpus.contains(tag) {
                self.add(weight, MatchReason::Tag(tag.clone()));
            }
        }
    }

    fn keywords(&mut self, corpus: &SearchCorpus, table: &KeywordTable, weight: f32) {
        for keyword in table.iter() {
            if corpus.contains(keyword) {
                self.add(weight, MatchReason::Keyword(keyword.to_owned()));
            }
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "threshold comparison allows for rounding in the weight sum"
    )]
    fn finish(self, candidate: Candidate<'_>, threshold: f32) -> MatchOutcome {
        let confidence = KeywordMatcher::sanitise(self.raw);
        if self.reasons.is_empty() || confidence + THRESHOLD_TOLERANCE < threshold {
            return MatchOutcome::Unmatched { confidence };
        }
        MatchOutcome::Matched(MatchSuggestion {
            kind: candidate.kind(),
            entity_id: candidate.id().to_owned(),
            entity_name: candidate.name().to_owned(),
            confidence,
            reasons: self.reasons,
            matched_text: self.matched_text,
        })
    }
}

/// Keyword and attribute matcher used by the back office.
///
/// # Examples
/// ```
/// use oshikatsu_core::{Item, MatchReason, SearchCorpus};
/// use oshikatsu_matcher::KeywordMatcher;
///
/// let matcher = KeywordMatcher::default();
/// let corpus = SearchCorpus::normalize(Some("Supreme"), Some("denim jacket review"));
/// let item = Item::new("item-1", "Box Logo Tee").with_brand("Supreme");
///
/// let suggestion = matcher.score_item(&corpus, &item).expect("brand match");
/// assert_eq!(suggestion.reasons, [MatchReason::Brand]);
/// assert_eq!(suggestion.matched_text.as_deref(), Some("Supreme"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    config: MatchConfig,
}

impl KeywordMatcher {
    /// Build a matcher from a validated configuration.
    ///
    /// # Errors
    /// Propagates [`MatchConfigError`] from [`MatchConfig::validate`].
    pub fn new(config: MatchConfig) -> Result<Self, MatchConfigError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Evaluate a location candidate.
    ///
    /// Rules fire in a fixed order: name, address, each tag, each keyword.
    /// A blank name makes the record unmatchable and is logged; a blank
    /// corpus matches nothing.
    #[must_use]
    pub fn evaluate_location(&self, corpus: &SearchCorpus, location: &Location) -> MatchOutcome {
        if location.name.trim().is_empty() {
            warn!("skipping location {} with a blank name", location.id);
            return MatchOutcome::Unmatched { confidence: 0.0 };
        }
        if corpus.is_blank() {
            return MatchOutcome::Unmatched { confidence: 0.0 };
        }
        let weights = self.config.location;
        let mut tally = Tally::default();
        if corpus.contains(&location.name) {
            tally.add(weights.name, MatchReason::Name);
            tally.matched_text = Some(location.name.clone());
        }
        if let Some(address) = location.address.as_deref()
            && corpus.contains(address)
        {
            tally.add(weights.address, MatchReason::Address);
        }
        tally.tags(corpus, &location.tags, weights.tag);
        tally.keywords(corpus, &self.config.location_keywords, weights.keyword);
        tally.finish(Candidate::Location(location), self.config.threshold)
    }

    /// Evaluate an item candidate.
    ///
    /// Rules fire in a fixed order: name, brand, category, each tag, each
    /// keyword. A brand hit replaces the name as the matched text.
    #[must_use]
    pub fn evaluate_item(&self, corpus: &SearchCorpus, item: &Item) -> MatchOutcome {
        if item.name.trim().is_empty() {
            warn!("skipping item {} with a blank name", item.id);
            return MatchOutcome::Unmatched { confidence: 0.0 };
        }
        if corpus.is_blank() {
            return MatchOutcome::Unmatched { confidence: 0.0 };
        }
        let weights = self.config.item;
        let mut tally = Tally::default();
        if corpus.contains(&item.name) {
            tally.add(weights.name, MatchReason::Name);
            tally.matched_text = Some(item.name.clone());
        }
        if let Some(brand) = item.brand.as_deref()
            && corpus.contains(brand)
        {
            tally.add(weights.brand, MatchReason::Brand);
            tally.matched_text = Some(brand.to_owned());
        }
        if let Some(category) = item.category.as_deref()
            && corpus.contains(category)
        {
            tally.add(weights.category, MatchReason::Category);
        }
        tally.tags(corpus, &item.tags, weights.tag);
        tally.keywords(corpus, &self.config.item_keywords, weights.keyword);
        tally.finish(Candidate::Item(item), self.config.threshold)
    }

    /// Score a location, keeping it only when it clears the threshold.
    #[must_use]
    pub fn score_location(&self, corpus: &SearchCorpus, location: &Location) -> Option<MatchSuggestion> {
        self.evaluate_location(corpus, location).into_suggestion()
    }

    /// Score an item, keeping it only when it clears the threshold.
    #[must_use]
    pub fn score_item(&self, corpus: &SearchCorpus, item: &Item) -> Option<MatchSuggestion> {
        self.evaluate_item(corpus, item).into_suggestion()
    }

    /// Score every candidate and rank the matches.
    ///
    /// `limit` truncates the ranked list; `None` keeps every match.
    #[must_use]
    pub fn suggest(
        &self,
        corpus: &SearchCorpus,
        candidates: &CandidateSet,
        limit: Option<usize>,
    ) -> Vec<MatchSuggestion> {
        if corpus.is_blank() {
            debug!("episode text is blank; no candidates can match");
            return Vec::new();
        }
        let matches = self.collect_matches(corpus, candidates);
        debug!(
            "{} of {} candidates cleared threshold {}",
            matches.len(),
            candidates.len(),
            self.config.threshold
        );
        rank_suggestions(matches, limit)
    }
}

impl Matcher for KeywordMatcher {
    fn evaluate(&self, corpus: &SearchCorpus, candidate: Candidate<'_>) -> MatchOutcome {
        match candidate {
            Candidate::Location(location) => self.evaluate_location(corpus, location),
            Candidate::Item(item) => self.evaluate_item(corpus, item),
        }
    }
}
