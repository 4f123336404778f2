//! Search corpus built from an episode's text.
//!
//! The corpus is folded to lower case exactly once, on construction. Lookups
//! fold the needle instead, so callers never fold the corpus again.
//!
//! # Examples
//! ```
//! use oshikatsu_core::SearchCorpus;
//!
//! let corpus = SearchCorpus::normalize(Some("Supreme"), Some("Denim jacket review"));
//! assert_eq!(corpus.as_str(), "supreme denim jacket review");
//! assert!(corpus.contains("SUPREME"));
//! assert!(!corpus.contains(""));
//! ```

use crate::Episode;

/// Lower-cased haystack used for substring matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCorpus {
    text: String,
}

impl SearchCorpus {
    /// Join `title` and `description` with a single space and fold case.
    ///
    /// Missing fields count as empty strings. Punctuation is kept.
    pub fn normalize(title: Option<&str>, description: Option<&str>) -> Self {
        let title = title.unwrap_or_default();
        let description = description.unwrap_or_default();
        let mut joined = String::with_capacity(title.len() + description.len() + 1);
        joined.push_str(title);
        joined.push(' ');
        joined.push_str(description);
        Self {
            text: joined.to_lowercase(),
        }
    }

    /// Build the corpus for an episode from its title and body text.
    pub fn from_episode(episode: &Episode) -> Self {
        Self::normalize(Some(&episode.title), episode.body())
    }

    /// The folded text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Report whether the corpus holds no searchable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Case-insensitive substring test.
    ///
    /// Blank needles never match, so an empty tag cannot match every corpus.
    pub fn contains(&self, needle: &str) -> bool {
        let trimmed = needle.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.text.contains(&needle.to_lowercase())
    }
}

impl std::fmt::Display for SearchCorpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
