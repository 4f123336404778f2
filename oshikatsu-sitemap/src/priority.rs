//! Priority and change-frequency scoring.
//!
//! Priorities are computed in hundredths and rounded half-up to tenths, so
//! the published value never depends on float formatting.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{PageKind, PageRecord};

const FRESH_DAYS: i64 = 7;
const RECENT_DAYS: i64 = 30;
const STALE_DAYS: i64 = 365;
const FRESH_BONUS: u32 = 10;
const RECENT_BONUS: u32 = 5;
const LINK_BONUS: u32 = 2;
const LINK_BONUS_CAP: u32 = 10;
const MIN_PRIORITY: u32 = 10;
const MAX_PRIORITY: u32 = 100;

/// Sitemap priority with one decimal place, in `0.1..=1.0`.
///
/// # Examples
/// ```
/// use oshikatsu_sitemap::Priority;
///
/// assert_eq!(Priority::from_tenths(7).to_string(), "0.7");
/// assert_eq!(Priority::from_tenths(10).to_string(), "1.0");
/// assert_eq!(Priority::from_tenths(0).to_string(), "0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    /// Build a priority from tenths, clamped into `1..=10`.
    #[must_use]
    pub fn from_tenths(tenths: u8) -> Self {
        Self(tenths.clamp(1, 10))
    }

    /// Priority in tenths.
    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }

    #[expect(
        clippy::integer_division,
        reason = "rounding half-up to tenths discards the remainder"
    )]
    fn from_hundredths(hundredths: u32) -> Self {
        let clamped = hundredths.clamp(MIN_PRIORITY, MAX_PRIORITY);
        let tenths = clamped.saturating_add(5) / 10;
        Self::from_tenths(u8::try_from(tenths).unwrap_or(10))
    }
}

impl fmt::Display for Priority {
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "tenths split into whole and fractional digits"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFreq {
    /// Changes daily.
    Daily,
    /// Changes weekly.
    Weekly,
    /// Changes monthly.
    Monthly,
    /// Changes yearly.
    Yearly,
}

impl ChangeFreq {
    /// Value used in the `<changefreq>` element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days since `updated_at`; updates in the future count as today.
fn age_days(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(updated_at).num_days().max(0)
}

/// Score a page.
///
/// The kind's base priority gains a freshness bonus (recent updates) and an
/// engagement bonus (linked episodes), then is clamped and rounded.
#[must_use]
pub fn priority(record: &PageRecord, now: DateTime<Utc>) -> Priority {
    let freshness = match record.updated_at.map(|at| age_days(at, now)) {
        Some(age) if age < FRESH_DAYS => FRESH_BONUS,
        Some(age) if age < RECENT_DAYS => RECENT_BONUS,
        _ => 0,
    };
    let engagement = record
        .link_count
        .saturating_mul(LINK_BONUS)
        .min(LINK_BONUS_CAP);
    let total = record
        .kind
        .base_priority()
        .saturating_add(freshness)
        .saturating_add(engagement);
    Priority::from_hundredths(total)
}

/// Expected change frequency of a page.
#[must_use]
pub fn change_freq(record: &PageRecord, now: DateTime<Utc>) -> ChangeFreq {
    match record.updated_at.map(|at| age_days(at, now)) {
        Some(age) if age < FRESH_DAYS => ChangeFreq::Daily,
        Some(age) if age < RECENT_DAYS => ChangeFreq::Weekly,
        Some(age) if age < STALE_DAYS => ChangeFreq::Monthly,
        Some(_) => ChangeFreq::Yearly,
        None => match record.kind {
            PageKind::Home => ChangeFreq::Daily,
            PageKind::Static => ChangeFreq::Monthly,
            PageKind::Celebrity | PageKind::Episode | PageKind::Location | PageKind::Item => {
                ChangeFreq::Weekly
            }
        },
    }
}
