//! Error types for the naiad-curve crate.

/// Error type for all fallible operations in the naiad-curve crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Returned when fewer segments are available than curve fitting needs.
    ///
    /// Fatal for the run but not for the engine: the caller may relax
    /// tolerances and retry.
    #[error("curve fitting requires at least {required} recession segments, found {found}")]
    InsufficientSegments {
        /// Number of segments found.
        found: usize,
        /// Minimum required.
        required: usize,
    },

    /// Returned by seasonal fitting when every season had too few segments.
    #[error("no season had enough segments to fit ({n_segments} segments total)")]
    NoFittableSeason {
        /// Total number of segments across all seasons.
        n_segments: usize,
    },

    /// Returned when a log-transform fit encounters a non-positive level.
    #[error("log-transform fit requires positive levels, got {value}")]
    NonPositiveLevel {
        /// The offending level value.
        value: f64,
    },

    /// Returned when the pooled points cannot support a fit (too few points
    /// or no spread in the regressor).
    #[error("degenerate fit input: {details}")]
    Degenerate {
        /// What made the input degenerate.
        details: &'static str,
    },

    /// Returned when the polynomial degree is outside 2..=4.
    #[error("polynomial degree must be 2..=4, got {degree}")]
    InvalidDegree {
        /// The invalid degree.
        degree: usize,
    },

    /// Returned when multi_segment is configured as its own seasonal inner
    /// curve type.
    #[error("multi_segment cannot be its own seasonal inner curve type")]
    InvalidInnerCurveType,

    /// Returned when the per-season segment minimum is below 2.
    #[error("min segments per season must be >= 2, got {value}")]
    InvalidSeasonMinimum {
        /// The invalid minimum.
        value: usize,
    },

    /// Returned when a multi_segment fit is requested through the pooled
    /// fitting entry point.
    #[error("multi_segment fits one curve per season; call fit_seasonal instead")]
    SeasonalFitRequired,
}
