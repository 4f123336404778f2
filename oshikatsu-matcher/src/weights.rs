//! Rule weights and the inclusion threshold.
//!
//! The defaults reproduce the back-office heuristic: a name hit alone clears
//! the threshold, while keyword hits only ever tip a borderline candidate
//! over it.

use serde::{Deserialize, Serialize};

use crate::{KeywordTable, MatchConfigError};

/// Default minimum confidence for a candidate to become a suggestion.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Weights applied to location rules.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationWeights {
    /// Added when the location name appears in the corpus.
    pub name: f32,
    /// Added when the address appears in the corpus.
    pub address: f32,
    /// Added once per tag found in the corpus.
    pub tag: f32,
    /// Added once per distinct location keyword found in the corpus.
    pub keyword: f32,
}

impl Default for LocationWeights {
    fn default() -> Self {
        Self {
            name: 0.9,
            address: 0.4,
            tag: 0.3,
            keyword: 0.1,
        }
    }
}

impl LocationWeights {
    fn check(self) -> Result<(), MatchConfigError> {
        check_weight("location.name", self.name)?;
        check_weight("location.address", self.address)?;
        check_weight("location.tag", self.tag)?;
        check_weight("location.keyword", self.keyword)
    }
}

/// Weights applied to item rules.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemWeights {
    /// Added when the item name appears in the corpus.
    pub name: f32,
    /// Added when the brand appears in the corpus.
    pub brand: f32,
    /// Added when the category appears in the corpus.
    pub category: f32,
    /// Added once per tag found in the corpus.
    pub tag: f32,
    /// Added once per distinct fashion keyword found in the corpus.
    pub keyword: f32,
}

impl Default for ItemWeights {
    fn default() -> Self {
        Self {
            name: 0.9,
            brand: 0.8,
            category: 0.5,
            tag: 0.3,
            keyword: 0.1,
        }
    }
}

impl ItemWeights {
    fn check(self) -> Result<(), MatchConfigError> {
        check_weight("item.name", self.name)?;
        check_weight("item.brand", self.brand)?;
        check_weight("item.category", self.category)?;
        check_weight("item.tag", self.tag)?;
        check_weight("item.keyword", self.keyword)
    }
}

fn check_weight(field: &'static str, value: f32) -> Result<(), MatchConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MatchConfigError::InvalidWeight { field, value })
    }
}

/// Complete matcher configuration.
///
/// Every field has a default, so a partial JSON document such as
/// `{"threshold": 0.5}` is a valid configuration.
///
/// # Examples
/// ```
/// use oshikatsu_matcher::MatchConfig;
///
/// let config: MatchConfig = serde_json::from_str(r#"{"threshold": 0.5}"#).unwrap();
/// assert_eq!(config.threshold, 0.5);
/// assert_eq!(config.location.name, 0.9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum confidence, inclusive, for a candidate to be suggested.
    pub threshold: f32,
    /// Location rule weights.
    pub location: LocationWeights,
    /// Item rule weights.
    pub item: ItemWeights,
    /// Keywords scanned for every location candidate.
    pub location_keywords: KeywordTable,
    /// Keywords scanned for every item candidate.
    pub item_keywords: KeywordTable,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            location: LocationWeights::default(),
            item: ItemWeights::default(),
            location_keywords: KeywordTable::locations(),
            item_keywords: KeywordTable::fashion(),
        }
    }
}

impl MatchConfig {
    /// Replace the inclusion threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the location keyword table.
    #[must_use]
    pub fn with_location_keywords(mut self, keywords: KeywordTable) -> Self {
        self.location_keywords = keywords;
        self
    }

    /// Replace the item keyword table.
    #[must_use]
    pub fn with_item_keywords(mut self, keywords: KeywordTable) -> Self {
        self.item_keywords = keywords;
        self
    }

    /// Validate the configuration and return it unchanged.
    ///
    /// # Errors
    /// Returns [`MatchConfigError::InvalidThreshold`] when the threshold is
    /// not a finite value in `0.0..=1.0`, and
    /// [`MatchConfigError::InvalidWeight`] for the first weight that is
    /// negative or not finite.
    pub fn validate(self) -> Result<Self, MatchConfigError> {
        if !(self.threshold.is_finite() && (0.0..=1.0).contains(&self.threshold)) {
            return Err(MatchConfigError::InvalidThreshold {
                value: self.threshold,
            });
        }
        self.location.check()?;
        self.item.check()?;
        Ok(self)
    }
}
