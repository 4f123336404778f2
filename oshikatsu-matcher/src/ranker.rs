//! Ordering of suggestions for display.

use oshikatsu_core::MatchSuggestion;

/// Number of suggestions the review screen shows by default.
pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

/// Sort suggestions by descending confidence and keep at most `limit`.
///
/// The sort is stable: suggestions with equal confidence keep their input
/// order, which for [`Matcher::collect_matches`] means locations before items.
///
/// [`Matcher::collect_matches`]: oshikatsu_core::Matcher::collect_matches
///
/// # Examples
/// ```
/// use oshikatsu_core::{MatchSuggestion, SuggestionKind};
/// use oshikatsu_matcher::rank_suggestions;
///
/// let suggestion = |id: &str, confidence| MatchSuggestion {
///     kind: SuggestionKind::Location,
///     entity_id: id.into(),
///     entity_name: id.into(),
///     confidence,
///     reasons: Vec::new(),
///     matched_text: None,
/// };
/// let ranked = rank_suggestions(
///     vec![suggestion("a", 0.4), suggestion("b", 0.9), suggestion("c", 0.4)],
///     Some(2),
/// );
/// let ids: Vec<_> = ranked.iter().map(|s| s.entity_id.as_str()).collect();
/// assert_eq!(ids, ["b", "a"]);
/// ```
#[must_use]
pub fn rank_suggestions(
    mut suggestions: Vec<MatchSuggestion>,
    limit: Option<usize>,
) -> Vec<MatchSuggestion> {
    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    if let Some(limit) = limit {
        suggestions.truncate(limit);
    }
    suggestions
}
