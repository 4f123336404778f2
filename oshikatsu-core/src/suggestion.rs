//! Match suggestions produced by the auto-matching heuristic.
//!
//! A suggestion proposes linking an episode to a location or an item. It
//! carries the confidence score, the ordered list of rules that fired, and
//! the text that triggered the strongest rule.

use std::fmt;

/// Kind of entity a suggestion points at.
///
/// # Examples
/// ```
/// use oshikatsu_core::SuggestionKind;
///
/// assert_eq!(SuggestionKind::Location.as_str(), "location");
/// assert_eq!("item".parse::<SuggestionKind>(), Ok(SuggestionKind::Item));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SuggestionKind {
    Location,
    Item,
}

impl SuggestionKind {
    /// Return the kind as a lowercase `&str`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SuggestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "location" => Ok(Self::Location),
            "item" => Ok(Self::Item),
            _ => Err(format!("unknown suggestion kind '{s}'")),
        }
    }
}

/// A rule that contributed to a candidate's confidence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "rule", content = "value", rename_all = "snake_case")
)]
pub enum MatchReason {
    /// The candidate's name appears in the corpus.
    Name,
    /// The location's address appears in the corpus.
    Address,
    /// The item's brand appears in the corpus.
    Brand,
    /// The item's category appears in the corpus.
    Category,
    /// One of the candidate's tags appears in the corpus.
    Tag(String),
    /// A generic domain keyword appears in the corpus.
    Keyword(String),
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name match"),
            Self::Address => f.write_str("address match"),
            Self::Brand => f.write_str("brand match"),
            Self::Category => f.write_str("category match"),
            Self::Tag(tag) => write!(f, "tag: {tag}"),
            Self::Keyword(keyword) => write!(f, "keyword: {keyword}"),
        }
    }
}

/// Proposed association between an episode and a catalogue entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSuggestion {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: SuggestionKind,
    pub entity_id: String,
    pub entity_name: String,
    /// Heuristic score in `0.0..=1.0`; not a probability.
    pub confidence: f32,
    /// Rules that fired, in evaluation order.
    pub reasons: Vec<MatchReason>,
    /// Name or brand that produced the strongest match, when any.
    pub matched_text: Option<String>,
}

impl MatchSuggestion {
    /// Comma-joined reason trace for display.
    ///
    /// # Examples
    /// ```
    /// use oshikatsu_core::{MatchReason, MatchSuggestion, SuggestionKind};
    ///
    /// let suggestion = MatchSuggestion {
    ///     kind: SuggestionKind::Location,
    ///     entity_id: "loc-1".into(),
    ///     entity_name: "Joe's Cafe".into(),
    ///     confidence: 0.5,
    ///     reasons: vec![MatchReason::Tag("coffee".into()), MatchReason::Keyword("cafe".into())],
    ///     matched_text: None,
    /// };
    /// assert_eq!(suggestion.match_reason(), "tag: coffee, keyword: cafe");
    /// ```
    pub fn match_reason(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Report whether this suggestion targets the given entity.
    pub fn targets(&self, kind: SuggestionKind, entity_id: &str) -> bool {
        self.kind == kind && self.entity_id == entity_id
    }
}

/// Result of evaluating one candidate against a corpus.
///
/// `Unmatched` means the candidate was evaluated and scored below the
/// inclusion threshold; it still reports the clamped confidence reached.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(MatchSuggestion),
    Unmatched { confidence: f32 },
}

impl MatchOutcome {
    /// Confidence reached by the candidate, matched or not.
    pub const fn confidence(&self) -> f32 {
        match self {
            Self::Matched(suggestion) => suggestion.confidence,
            Self::Unmatched { confidence } => *confidence,
        }
    }

    /// Report whether the candidate qualified as a suggestion.
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Discard the unmatched case.
    pub fn into_suggestion(self) -> Option<MatchSuggestion> {
        match self {
            Self::Matched(suggestion) => Some(suggestion),
            Self::Unmatched { .. } => None,
        }
    }
}
