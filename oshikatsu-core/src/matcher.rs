//! Evaluate catalogue candidates against an episode corpus.
//!
//! The `Matcher` trait turns a [`Candidate`](crate::Candidate) and a
//! [`SearchCorpus`](crate::SearchCorpus) into a
//! [`MatchOutcome`](crate::MatchOutcome).

use crate::{Candidate, CandidateSet, MatchOutcome, MatchSuggestion, SearchCorpus};

/// Decide whether a candidate is relevant to an episode.
///
/// Implementations must be pure: evaluating the same inputs twice yields the
/// same outcome. They must be thread-safe (`Send` + `Sync`) and infallible.
///
/// Implementations must:
/// - Produce finite confidences.
/// - Clamp confidences to the range `0.0..=1.0`.
///
/// Use [`Matcher::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use oshikatsu_core::{
///     Candidate, Location, MatchOutcome, Matcher, SearchCorpus,
/// };
///
/// struct NeverMatcher;
///
/// impl Matcher for NeverMatcher {
///     fn evaluate(&self, _corpus: &SearchCorpus, _candidate: Candidate<'_>) -> MatchOutcome {
///         MatchOutcome::Unmatched { confidence: 0.0 }
///     }
/// }
///
/// let location = Location::new("loc-1", "Harbour");
/// let corpus = SearchCorpus::normalize(Some("harbour walk"), None);
/// let outcome = NeverMatcher.evaluate(&corpus, Candidate::Location(&location));
/// assert!(!outcome.is_matched());
/// ```
pub trait Matcher: Send + Sync {
    /// Evaluate `candidate` against `corpus`.
    fn evaluate(&self, corpus: &SearchCorpus, candidate: Candidate<'_>) -> MatchOutcome;

    /// Evaluate every candidate in merge order and keep the matches.
    ///
    /// The result is unranked: locations precede items and input order is
    /// preserved within each list.
    fn collect_matches(&self, corpus: &SearchCorpus, candidates: &CandidateSet) -> Vec<MatchSuggestion> {
        candidates
            .iter()
            .filter_map(|candidate| self.evaluate(corpus, candidate).into_suggestion())
            .collect()
    }

    /// Clamp and validate a raw confidence.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(confidence: f32) -> f32
    where
        Self: Sized,
    {
        if !confidence.is_finite() {
            return 0.0;
        }
        confidence.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Item, Location, MatchReason, SuggestionKind};

    struct NameMatcher;

    impl Matcher for NameMatcher {
        fn evaluate(&self, corpus: &SearchCorpus, candidate: Candidate<'_>) -> MatchOutcome {
            if corpus.contains(candidate.name()) {
                MatchOutcome::Matched(MatchSuggestion {
                    kind: candidate.kind(),
                    entity_id: candidate.id().to_owned(),
                    entity_name: candidate.name().to_owned(),
                    confidence: Self::sanitise(2.0),
                    reasons: vec![MatchReason::Name],
                    matched_text: Some(candidate.name().to_owned()),
                })
            } else {
                MatchOutcome::Unmatched { confidence: 0.0 }
            }
        }
    }

    #[test]
    fn sanitise_rejects_non_finite_values() {
        assert_eq!(NameMatcher::sanitise(f32::NAN), 0.0);
        assert_eq!(NameMatcher::sanitise(f32::INFINITY), 0.0);
        assert_eq!(NameMatcher::sanitise(-0.5), 0.0);
        assert_eq!(NameMatcher::sanitise(1.5), 1.0);
    }

    #[test]
    fn collect_matches_keeps_merge_order() {
        let candidates = CandidateSet::new(
            vec![Location::new("loc-1", "harbour")],
            vec![Item::new("item-1", "cap"), Item::new("item-2", "scarf")],
        );
        let corpus = SearchCorpus::normalize(Some("Harbour walk in a cap"), None);
        let matches = NameMatcher.collect_matches(&corpus, &candidates);
        let kinds: Vec<_> = matches.iter().map(|m| (m.kind, m.entity_id.as_str())).collect();
        assert_eq!(
            kinds,
            [(SuggestionKind::Location, "loc-1"), (SuggestionKind::Item, "item-1")]
        );
        assert!(matches.iter().all(|m| m.confidence == 1.0));
    }
}
