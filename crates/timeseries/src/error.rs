//! Error types for the naiad-timeseries crate.

use naiad_calendar::CalendarError;

/// Error type for all fallible operations in the naiad-timeseries crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when the input contains no readings.
    #[error("time series contains no readings")]
    Empty,

    /// Returned when timestamps are not in ascending order.
    #[error("timestamps out of order at index {index}")]
    UnsortedTimestamps {
        /// Index of the first reading that breaks the ordering.
        index: usize,
    },

    /// Returned when two readings share a timestamp.
    #[error("duplicate timestamp at index {index}")]
    DuplicateTimestamp {
        /// Index of the second reading with the repeated timestamp.
        index: usize,
    },

    /// Returned when a water level is NaN or infinite.
    #[error("non-finite water level at index {index}")]
    NonFiniteLevel {
        /// Index of the offending reading.
        index: usize,
    },

    /// Returned when a precipitation value is negative, NaN, or infinite.
    #[error("invalid precipitation {value} at index {index}")]
    InvalidPrecipitation {
        /// Index of the offending reading.
        index: usize,
        /// The invalid precipitation value.
        value: f64,
    },

    /// Returned when the smoothing window is not an odd number >= 3.
    #[error("smoothing window must be an odd number >= 3, got {window}")]
    InvalidSmoothingWindow {
        /// The invalid window length.
        window: usize,
    },

    /// Water-year start date validation failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty() {
        assert_eq!(
            SeriesError::Empty.to_string(),
            "time series contains no readings"
        );
    }

    #[test]
    fn error_unsorted() {
        let e = SeriesError::UnsortedTimestamps { index: 4 };
        assert_eq!(e.to_string(), "timestamps out of order at index 4");
    }

    #[test]
    fn error_duplicate() {
        let e = SeriesError::DuplicateTimestamp { index: 2 };
        assert_eq!(e.to_string(), "duplicate timestamp at index 2");
    }

    #[test]
    fn error_invalid_window() {
        let e = SeriesError::InvalidSmoothingWindow { window: 4 };
        assert_eq!(
            e.to_string(),
            "smoothing window must be an odd number >= 3, got 4"
        );
    }

    #[test]
    fn error_from_calendar() {
        let e: SeriesError = CalendarError::InvalidMonth { month: 13 }.into();
        assert_eq!(e.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}
