//! Error types raised while configuring the matcher.

use thiserror::Error;

/// Errors raised when a [`MatchConfig`](crate::MatchConfig) is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchConfigError {
    /// A rule weight was negative or not finite.
    #[error("weight {field} must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Dotted path of the offending weight, e.g. `location.name`.
        field: &'static str,
        /// Value found in the configuration.
        value: f32,
    },
    /// The inclusion threshold fell outside `0.0..=1.0`.
    #[error("threshold must be within 0.0..=1.0, got {value}")]
    InvalidThreshold {
        /// Value found in the configuration.
        value: f32,
    },
}
