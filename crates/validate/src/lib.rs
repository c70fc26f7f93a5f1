//! Cross-validation of master curve fits.
//!
//! Partitions recession segments into folds, refits the curve on each
//! training subset, and scores the refit against the held-out segments'
//! observed levels. Folds are independent and run in parallel; the
//! aggregation into a [`CrossValidationResult`] happens after all folds
//! complete.

mod config;
mod error;
mod folds;
mod result;

use naiad_curve::{CurveType, FitConfig, fit_pooled};
use naiad_segments::RecessionSegment;
use rayon::prelude::*;
use tracing::debug;

pub use config::{CvConfig, CvMethod};
pub use error::ValidateError;
pub use result::{CrossValidationResult, DEGRADATION_MARGIN, FoldScore};

/// Cross-validates a pooled curve fit across segment folds.
///
/// `full_r_squared` is the R² of the full-data fit; a mean validation R²
/// more than [`DEGRADATION_MARGIN`] below it marks the result as degraded (a
/// quality flag, not an error). Folds whose refit fails on degenerate
/// training data are skipped and counted.
///
/// Seasonal (multi-segment) fits validate their pooled inner curve type;
/// pass that inner type here.
///
/// # Errors
///
/// Returns [`ValidateError::TooFewSegments`] for fewer than 2 segments,
/// [`ValidateError::PooledCurveRequired`] for
/// [`CurveType::MultiSegment`], or [`ValidateError::NoCompletedFolds`] when
/// every fold refit fails.
#[tracing::instrument(skip_all, fields(method = config.method().label(), n_segments = segments.len()))]
pub fn cross_validate(
    segments: &[RecessionSegment],
    curve_type: CurveType,
    full_r_squared: f64,
    fit_config: &FitConfig,
    config: &CvConfig,
) -> Result<CrossValidationResult, ValidateError> {
    config.validate()?;
    if curve_type == CurveType::MultiSegment {
        return Err(ValidateError::PooledCurveRequired);
    }
    if segments.len() < 2 {
        return Err(ValidateError::TooFewSegments {
            found: segments.len(),
            min: 2,
        });
    }

    let fold_indices = folds::build_folds(segments, config);
    let n_folds = fold_indices.len();

    let outcomes: Vec<Option<FoldScore>> = fold_indices
        .par_iter()
        .enumerate()
        .map(|(fold, indices)| {
            let train_points: Vec<(f64, f64)> = indices
                .train
                .iter()
                .flat_map(|&i| segments[i].points().iter().copied())
                .collect();
            let curve =
                fit_pooled(&train_points, curve_type, indices.train.len(), fit_config).ok()?;

            let mut observed = Vec::new();
            let mut predicted = Vec::new();
            for &i in &indices.validation {
                for &(t, level) in segments[i].points() {
                    observed.push(level);
                    predicted.push(curve.evaluate(t));
                }
            }
            let r_squared = naiad_stats::r_squared(&observed, &predicted)?;

            Some(FoldScore {
                fold,
                n_train: indices.train.len(),
                n_validation: indices.validation.len(),
                r_squared,
                parameters: curve.parameters().to_vec(),
            })
        })
        .collect();

    let completed: Vec<FoldScore> = outcomes.into_iter().flatten().collect();
    let n_failed_folds = n_folds - completed.len();
    if completed.is_empty() {
        return Err(ValidateError::NoCompletedFolds { n_folds });
    }

    let fold_r2: Vec<f64> = completed.iter().map(|f| f.r_squared).collect();
    let mean_r_squared = naiad_stats::mean(&fold_r2);
    let degraded = full_r_squared - mean_r_squared > DEGRADATION_MARGIN;
    debug!(mean_r_squared, n_failed_folds, degraded, "cross-validation complete");

    Ok(CrossValidationResult::new(
        config.method(),
        completed,
        mean_r_squared,
        n_failed_folds,
        degraded,
    ))
}
