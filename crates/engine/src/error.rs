//! Engine error taxonomy.
//!
//! Fatal conditions abort the run and name the offending parameter or
//! condition; low goodness-of-fit is never an error, only a quality metric
//! in the result.

use naiad_curve::FitError;
use naiad_segments::SegmentError;
use naiad_timeseries::SeriesError;
use naiad_validate::ValidateError;

/// Error type for a recharge calculation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// No readings were provided (or none survived preprocessing).
    #[error("time series contains no readings")]
    EmptySeries,

    /// Too few recession segments for curve fitting. Fatal for this run;
    /// the caller may relax tolerances and retry.
    #[error("insufficient recession segments: found {found}, need {required}")]
    InsufficientSegments {
        /// Number of segments found.
        found: usize,
        /// Minimum required.
        required: usize,
    },

    /// An out-of-range parameter.
    #[error("invalid parameter {name}: {value} ({constraint})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// The violated constraint.
        constraint: &'static str,
    },

    /// A structural defect in the input series.
    #[error(transparent)]
    Series(SeriesError),

    /// Segment identification rejected its configuration.
    #[error(transparent)]
    Segments(#[from] SegmentError),

    /// Curve fitting failed.
    #[error(transparent)]
    Fit(FitError),

    /// Cross-validation failed.
    #[error(transparent)]
    Validation(#[from] ValidateError),

    /// JSON serialization of the result failed.
    ///
    /// The `reason` field is a `String` because `serde_json::Error` is
    /// neither `Clone` nor `PartialEq`.
    #[error("serialization error: {reason}")]
    Serialization {
        /// The underlying serializer message.
        reason: String,
    },
}

impl From<SeriesError> for EngineError {
    fn from(e: SeriesError) -> Self {
        match e {
            SeriesError::Empty => EngineError::EmptySeries,
            other => EngineError::Series(other),
        }
    }
}

impl From<FitError> for EngineError {
    fn from(e: FitError) -> Self {
        match e {
            FitError::InsufficientSegments { found, required } => {
                EngineError::InsufficientSegments { found, required }
            }
            other => EngineError::Fit(other),
        }
    }
}
