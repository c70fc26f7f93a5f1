//! Output types for cross-validation runs.

use serde::Serialize;

use crate::config::CvMethod;

/// How far the mean validation R² may fall below the full-data R² before the
/// result is flagged as degraded.
pub const DEGRADATION_MARGIN: f64 = 0.1;

/// Score of a single completed fold.
///
/// The refit parameters are kept so downstream scoring can evaluate the
/// cross-validated curve at event timestamps without refitting.
#[derive(Debug, Clone, Serialize)]
pub struct FoldScore {
    /// Fold index within the partition.
    pub fold: usize,
    /// Number of training segments.
    pub n_train: usize,
    /// Number of held-out segments.
    pub n_validation: usize,
    /// R² of observed vs predicted over the held-out points.
    pub r_squared: f64,
    /// Parameters of the curve refit on the training subset.
    pub parameters: Vec<f64>,
}

/// Result of a cross-validation run.
#[derive(Debug, Clone, Serialize)]
pub struct CrossValidationResult {
    method: CvMethod,
    folds: Vec<FoldScore>,
    mean_r_squared: f64,
    n_failed_folds: usize,
    degraded: bool,
}

impl CrossValidationResult {
    /// Creates a result (crate-internal constructor).
    pub(crate) fn new(
        method: CvMethod,
        folds: Vec<FoldScore>,
        mean_r_squared: f64,
        n_failed_folds: usize,
        degraded: bool,
    ) -> Self {
        Self {
            method,
            folds,
            mean_r_squared,
            n_failed_folds,
            degraded,
        }
    }

    /// Returns the partitioning method used.
    pub fn method(&self) -> CvMethod {
        self.method
    }

    /// Returns the completed fold scores.
    pub fn folds(&self) -> &[FoldScore] {
        &self.folds
    }

    /// Per-fold validation R² values, in fold order.
    pub fn fold_r_squared(&self) -> Vec<f64> {
        self.folds.iter().map(|f| f.r_squared).collect()
    }

    /// Mean validation R² across completed folds.
    pub fn mean_r_squared(&self) -> f64 {
        self.mean_r_squared
    }

    /// Number of folds whose refit failed.
    pub fn n_failed_folds(&self) -> usize {
        self.n_failed_folds
    }

    /// True when the mean validation R² fell more than
    /// [`DEGRADATION_MARGIN`] below the full-data R².
    pub fn degraded(&self) -> bool {
        self.degraded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrossValidationResult {
        CrossValidationResult::new(
            CvMethod::KFold,
            vec![
                FoldScore {
                    fold: 0,
                    n_train: 4,
                    n_validation: 1,
                    r_squared: 0.9,
                    parameters: vec![10.0, 0.05],
                },
                FoldScore {
                    fold: 1,
                    n_train: 4,
                    n_validation: 1,
                    r_squared: 0.8,
                    parameters: vec![10.1, 0.051],
                },
            ],
            0.85,
            0,
            false,
        )
    }

    #[test]
    fn test_accessors() {
        let r = sample();
        assert_eq!(r.method(), CvMethod::KFold);
        assert_eq!(r.folds().len(), 2);
        assert_eq!(r.fold_r_squared(), vec![0.9, 0.8]);
        assert_eq!(r.mean_r_squared(), 0.85);
        assert_eq!(r.n_failed_folds(), 0);
        assert!(!r.degraded());
    }

    #[test]
    fn test_serializes() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"k_fold\""));
        assert!(json.contains("\"mean_r_squared\":0.85"));
    }
}
