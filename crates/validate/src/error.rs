//! Error types for the naiad-validate crate.

/// Error type for all fallible operations in the naiad-validate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidateError {
    /// Returned when k is below 2.
    #[error("k must be >= 2, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when there are too few segments to form folds.
    #[error("cross-validation needs at least {min} segments, found {found}")]
    TooFewSegments {
        /// Number of segments found.
        found: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when the multi_segment curve type is passed directly;
    /// seasonal fits validate through their pooled inner curve type.
    #[error("cross-validation refits a pooled curve type; pass the seasonal inner type")]
    PooledCurveRequired,

    /// Returned when every fold refit failed on degenerate training data.
    #[error("all {n_folds} fold refits failed")]
    NoCompletedFolds {
        /// Number of folds attempted.
        n_folds: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_k() {
        assert_eq!(ValidateError::InvalidK { k: 0 }.to_string(), "k must be >= 2, got 0");
    }

    #[test]
    fn error_too_few_segments() {
        let e = ValidateError::TooFewSegments { found: 1, min: 2 };
        assert_eq!(
            e.to_string(),
            "cross-validation needs at least 2 segments, found 1"
        );
    }

    #[test]
    fn error_no_completed_folds() {
        let e = ValidateError::NoCompletedFolds { n_folds: 5 };
        assert_eq!(e.to_string(), "all 5 fold refits failed");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ValidateError>();
    }
}
