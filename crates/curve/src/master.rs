//! The fitted master curve type and its evaluation.

use naiad_calendar::Season;
use serde::Serialize;

use crate::curve_type::CurveType;

/// Offset added to `t` by the power-law model to avoid a singularity at the
/// segment start (`t = 0`).
pub const POWER_EPS: f64 = 1e-3;

/// A fitted master recession curve.
///
/// Immutable once fit; refitting always produces a new value. For seasonal
/// (multi-segment) fits, `season` records which partition the curve belongs
/// to.
#[derive(Debug, Clone, Serialize)]
pub struct MasterCurve {
    curve_type: CurveType,
    parameters: Vec<f64>,
    r_squared: f64,
    segment_count: usize,
    season: Option<Season>,
}

impl MasterCurve {
    /// Creates a fitted curve (crate-internal constructor).
    pub(crate) fn new(
        curve_type: CurveType,
        parameters: Vec<f64>,
        r_squared: f64,
        segment_count: usize,
        season: Option<Season>,
    ) -> Self {
        Self {
            curve_type,
            parameters,
            r_squared,
            segment_count,
            season,
        }
    }

    /// Returns the functional form.
    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Returns the fitted parameters.
    ///
    /// Exponential: `[L0, a]`. Power: `[L0, b]`. Linear: log-space
    /// `[intercept, slope]`. Polynomial: coefficients in ascending order.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    /// Coefficient of determination over the pooled fit points, in raw
    /// level space.
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Number of segments pooled into the fit.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// The seasonal partition this curve was fitted on, for multi-segment
    /// fits.
    pub fn season(&self) -> Option<Season> {
        self.season
    }

    /// Predicted level at `t` days since recession onset.
    pub fn evaluate(&self, t: f64) -> f64 {
        evaluate_params(self.curve_type, &self.parameters, t)
    }
}

/// Evaluates curve parameters without a [`MasterCurve`] wrapper.
///
/// Used by cross-validation to evaluate fold refits from their stored
/// parameter vectors.
///
/// # Panics
///
/// Panics if the parameter vector does not match the curve type, or if the
/// curve type is [`CurveType::MultiSegment`] (seasonal curves are evaluated
/// through their per-season members).
pub fn evaluate_params(curve_type: CurveType, parameters: &[f64], t: f64) -> f64 {
    match curve_type {
        CurveType::Exponential => {
            assert_eq!(parameters.len(), 2, "exponential curve takes [L0, a]");
            parameters[0] * (-parameters[1] * t).exp()
        }
        CurveType::Power => {
            assert_eq!(parameters.len(), 2, "power curve takes [L0, b]");
            parameters[0] * (t + POWER_EPS).powf(-parameters[1])
        }
        CurveType::Linear => {
            assert_eq!(parameters.len(), 2, "linear curve takes [intercept, slope]");
            (parameters[0] + parameters[1] * t).exp()
        }
        CurveType::Polynomial => {
            assert!(!parameters.is_empty(), "polynomial curve takes coefficients");
            // Horner evaluation, coefficients in ascending order.
            parameters.iter().rev().fold(0.0, |acc, &c| acc * t + c)
        }
        CurveType::MultiSegment => {
            unreachable!("multi_segment curves are evaluated per season")
        }
    }
}
