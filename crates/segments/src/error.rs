//! Error types for the naiad-segments crate.

use naiad_calendar::CalendarError;

/// Error type for all fallible operations in the naiad-segments crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentError {
    /// Returned when the minimum recession length is non-finite or
    /// non-positive.
    #[error("min recession length must be finite and positive, got {value}")]
    InvalidMinLength {
        /// The invalid length (days).
        value: f64,
    },

    /// Returned when a tolerance or lag is negative or non-finite.
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidTolerance {
        /// Name of the offending field.
        field: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Returned when the antecedent period is non-finite or non-positive.
    #[error("antecedent period must be finite and positive, got {value}")]
    InvalidAntecedentPeriod {
        /// The invalid period (days).
        value: f64,
    },

    /// Returned when a segment is constructed from fewer than 2 points.
    #[error("a recession segment needs at least 2 points, got {got}")]
    TooFewPoints {
        /// Number of points provided.
        got: usize,
    },

    /// Season classification failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
