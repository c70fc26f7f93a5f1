//! Pooled curve fitting over recession segments.

use naiad_calendar::Season;
use naiad_segments::RecessionSegment;
use tracing::debug;

use crate::config::FitConfig;
use crate::curve_type::CurveType;
use crate::error::FitError;
use crate::master::{MasterCurve, POWER_EPS, evaluate_params};
use crate::poly;

/// Minimum number of recession segments a pooled fit needs to be meaningful.
pub const MIN_SEGMENTS: usize = 3;

/// Fits a master curve to the pooled points of all segments.
///
/// Every segment contributes its points in its own `t = 0`-at-start
/// coordinates. The reported R² is the coefficient of determination between
/// observed and fitted levels over all pooled points, in raw level space.
///
/// # Errors
///
/// Returns [`FitError::InsufficientSegments`] for fewer than
/// [`MIN_SEGMENTS`] segments, [`FitError::SeasonalFitRequired`] for
/// [`CurveType::MultiSegment`] (use [`fit_seasonal`](crate::fit_seasonal)),
/// [`FitError::NonPositiveLevel`] when a log-transform fit sees a level
/// <= 0, or [`FitError::Degenerate`] when the pooled points cannot support
/// the fit.
#[tracing::instrument(skip_all, fields(curve_type = curve_type.label(), n_segments = segments.len()))]
pub fn fit_master_curve(
    segments: &[RecessionSegment],
    curve_type: CurveType,
    config: &FitConfig,
) -> Result<MasterCurve, FitError> {
    config.validate()?;
    if curve_type == CurveType::MultiSegment {
        return Err(FitError::SeasonalFitRequired);
    }
    if segments.len() < MIN_SEGMENTS {
        return Err(FitError::InsufficientSegments {
            found: segments.len(),
            required: MIN_SEGMENTS,
        });
    }

    let points = pooled_points(segments);
    let curve = fit_points(&points, curve_type, config.poly_degree(), None, segments.len())?;
    debug!(r_squared = curve.r_squared(), "pooled fit complete");
    Ok(curve)
}

/// Fits a curve directly to pooled points, bypassing the segment-count gate.
///
/// Cross-validation fold refits use this: a training subset may legitimately
/// hold fewer than [`MIN_SEGMENTS`] segments. `segment_count` is recorded on
/// the returned curve. Everywhere else, prefer [`fit_master_curve`].
///
/// # Errors
///
/// Same as [`fit_master_curve`], minus the segment-count check.
pub fn fit_pooled(
    points: &[(f64, f64)],
    curve_type: CurveType,
    segment_count: usize,
    config: &FitConfig,
) -> Result<MasterCurve, FitError> {
    config.validate()?;
    if curve_type == CurveType::MultiSegment {
        return Err(FitError::SeasonalFitRequired);
    }
    fit_points(points, curve_type, config.poly_degree(), None, segment_count)
}

/// Concatenates segment points, each already offset to its own start.
pub(crate) fn pooled_points(segments: &[RecessionSegment]) -> Vec<(f64, f64)> {
    segments
        .iter()
        .flat_map(|s| s.points().iter().copied())
        .collect()
}

/// Fits one concrete (non-seasonal) curve type to pooled points.
pub(crate) fn fit_points(
    points: &[(f64, f64)],
    curve_type: CurveType,
    poly_degree: usize,
    season: Option<Season>,
    segment_count: usize,
) -> Result<MasterCurve, FitError> {
    let parameters = match curve_type {
        CurveType::Exponential => {
            let (intercept, slope) = log_level_regression(points, |t| t)?;
            vec![intercept.exp(), -slope]
        }
        CurveType::Power => {
            let (intercept, slope) = log_level_regression(points, |t| (t + POWER_EPS).ln())?;
            vec![intercept.exp(), -slope]
        }
        CurveType::Linear => {
            let (intercept, slope) = log_level_regression(points, |t| t)?;
            vec![intercept, slope]
        }
        CurveType::Polynomial => poly::fit_polynomial(points, poly_degree).ok_or(
            FitError::Degenerate {
                details: "polynomial normal equations are singular",
            },
        )?,
        CurveType::MultiSegment => return Err(FitError::SeasonalFitRequired),
    };

    let observed: Vec<f64> = points.iter().map(|&(_, l)| l).collect();
    let predicted: Vec<f64> = points
        .iter()
        .map(|&(t, _)| evaluate_params(curve_type, &parameters, t))
        .collect();
    let r_squared =
        naiad_stats::r_squared(&observed, &predicted).ok_or(FitError::Degenerate {
            details: "too few points for a goodness-of-fit statistic",
        })?;

    Ok(MasterCurve::new(
        curve_type,
        parameters,
        r_squared,
        segment_count,
        season,
    ))
}

/// Regression of `ln(level)` on a transform of `t`. Shared by the
/// exponential, power, and linear fits.
fn log_level_regression(
    points: &[(f64, f64)],
    transform: impl Fn(f64) -> f64,
) -> Result<(f64, f64), FitError> {
    if let Some(&(_, bad)) = points.iter().find(|&&(_, l)| l <= 0.0) {
        return Err(FitError::NonPositiveLevel { value: bad });
    }
    let x: Vec<f64> = points.iter().map(|&(t, _)| transform(t)).collect();
    let y: Vec<f64> = points.iter().map(|&(_, l)| l.ln()).collect();
    naiad_stats::linear_regression(&x, &y).ok_or(FitError::Degenerate {
        details: "no spread in the regression abscissa",
    })
}
