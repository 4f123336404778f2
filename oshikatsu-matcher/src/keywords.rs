//! Generic domain keywords that nudge a candidate's confidence.
//!
//! Keyword hits are weak evidence: they add a small weight per distinct
//! keyword found in the corpus, whichever candidate is being scored. Tables
//! are configuration so new locales can be added without touching the rules.

use serde::{Deserialize, Serialize};

const LOCATION_KEYWORDS: &[&str] = &[
    "cafe",
    "coffee",
    "restaurant",
    "hotel",
    "bakery",
    "museum",
    "shrine",
    "temple",
    "カフェ",
    "喫茶",
    "レストラン",
    "ホテル",
    "ショップ",
    "神社",
    "公園",
];

const ITEM_KEYWORDS: &[&str] = &[
    "clothing",
    "clothes",
    "worn",
    "wearing",
    "fashion",
    "outfit",
    "bag",
    "shoes",
    "sneakers",
    "accessory",
    "着用",
    "衣装",
    "私服",
    "ファッション",
    "コーデ",
    "バッグ",
    "アクセサリー",
];

/// A set of lower-case keywords.
///
/// Construction folds case, trims whitespace, drops blank entries and
/// removes duplicates while keeping first-seen order, so each keyword can fire
/// at most once per evaluation.
///
/// # Examples
/// ```
/// use oshikatsu_matcher::KeywordTable;
///
/// let table = KeywordTable::new(["Cafe", "cafe", " ", "Bar"]);
/// assert_eq!(table.iter().collect::<Vec<_>>(), ["cafe", "bar"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordTable {
    keywords: Vec<String>,
}

impl KeywordTable {
    /// Build a table from arbitrary keywords.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalised: Vec<String> = Vec::new();
        for keyword in keywords {
            let folded = keyword.as_ref().trim().to_lowercase();
            if folded.is_empty() || normalised.contains(&folded) {
                continue;
            }
            normalised.push(folded);
        }
        Self {
            keywords: normalised,
        }
    }

    /// Default bilingual keywords hinting at a venue.
    #[must_use]
    pub fn locations() -> Self {
        Self::new(LOCATION_KEYWORDS)
    }

    /// Default bilingual keywords hinting at clothing or accessories.
    #[must_use]
    pub fn fashion() -> Self {
        Self::new(ITEM_KEYWORDS)
    }

    /// An empty table that never fires.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    /// Iterate keywords in table order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Report whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl From<Vec<String>> for KeywordTable {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<KeywordTable> for Vec<String> {
    fn from(table: KeywordTable) -> Self {
        table.keywords
    }
}
