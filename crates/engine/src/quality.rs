//! Event and run quality scoring.
//!
//! The exact weighting of the quality factors is deliberately a configurable
//! weight vector rather than a fixed formula; the defaults below are
//! documented, not canonical. Every score lands in [0, 1].

use std::collections::BTreeMap;

use naiad_calendar::Season;
use serde::Serialize;

use crate::error::EngineError;

/// Weights of the three per-event quality factors (ERC).
///
/// Factors:
/// - `deviation`: deviation magnitude relative to the threshold, saturating
///   upward;
/// - `cross_validation`: agreement between the full-data curve and the mean
///   cross-validated fold curve at the event's recession age;
/// - `seasonal`: plausibility of recharge in the event's season, taken as
///   one minus the season's share of the recession-segment pool.
///
/// Weights are normalized over their sum when combined.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QualityWeights {
    deviation: f64,
    cross_validation: f64,
    seasonal: f64,
}

impl QualityWeights {
    /// Creates the default weighting: 0.5 deviation, 0.3 cross-validation,
    /// 0.2 seasonal.
    pub fn new() -> Self {
        Self {
            deviation: 0.5,
            cross_validation: 0.3,
            seasonal: 0.2,
        }
    }

    /// Sets the deviation-magnitude weight.
    pub fn with_deviation(mut self, w: f64) -> Self {
        self.deviation = w;
        self
    }

    /// Sets the cross-validation agreement weight.
    pub fn with_cross_validation(mut self, w: f64) -> Self {
        self.cross_validation = w;
        self
    }

    /// Sets the seasonal plausibility weight.
    pub fn with_seasonal(mut self, w: f64) -> Self {
        self.seasonal = w;
        self
    }

    /// Returns the deviation-magnitude weight.
    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    /// Returns the cross-validation agreement weight.
    pub fn cross_validation(&self) -> f64 {
        self.cross_validation
    }

    /// Returns the seasonal plausibility weight.
    pub fn seasonal(&self) -> f64 {
        self.seasonal
    }

    /// Validates this weighting.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if any weight is negative
    /// or non-finite, or if the weights sum to zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, w) in [
            ("quality_weights.deviation", self.deviation),
            ("quality_weights.cross_validation", self.cross_validation),
            ("quality_weights.seasonal", self.seasonal),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(EngineError::InvalidParameter {
                    name,
                    value: w,
                    constraint: "must be finite and non-negative",
                });
            }
        }
        let sum = self.deviation + self.cross_validation + self.seasonal;
        if sum <= 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "quality_weights",
                value: sum,
                constraint: "weights must sum to a positive value",
            });
        }
        Ok(())
    }
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self::new()
    }
}

/// Weights of the overall calculation quality (ERC): master-curve R²,
/// mean cross-validation R², and mean per-event quality.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OverallWeights {
    curve: f64,
    validation: f64,
    events: f64,
}

impl OverallWeights {
    /// Creates the default weighting: 0.4 curve, 0.3 validation, 0.3 events.
    pub fn new() -> Self {
        Self {
            curve: 0.4,
            validation: 0.3,
            events: 0.3,
        }
    }

    /// Sets the master-curve R² weight.
    pub fn with_curve(mut self, w: f64) -> Self {
        self.curve = w;
        self
    }

    /// Sets the cross-validation R² weight.
    pub fn with_validation(mut self, w: f64) -> Self {
        self.validation = w;
        self
    }

    /// Sets the mean event-quality weight.
    pub fn with_events(mut self, w: f64) -> Self {
        self.events = w;
        self
    }

    /// Returns the master-curve R² weight.
    pub fn curve(&self) -> f64 {
        self.curve
    }

    /// Returns the cross-validation R² weight.
    pub fn validation(&self) -> f64 {
        self.validation
    }

    /// Returns the mean event-quality weight.
    pub fn events(&self) -> f64 {
        self.events
    }

    /// Validates this weighting.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if any weight is negative
    /// or non-finite, or if the weights sum to zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, w) in [
            ("overall_weights.curve", self.curve),
            ("overall_weights.validation", self.validation),
            ("overall_weights.events", self.events),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(EngineError::InvalidParameter {
                    name,
                    value: w,
                    constraint: "must be finite and non-negative",
                });
            }
        }
        let sum = self.curve + self.validation + self.events;
        if sum <= 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "overall_weights",
                value: sum,
                constraint: "weights must sum to a positive value",
            });
        }
        Ok(())
    }
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self::new()
    }
}

/// Deviation-magnitude factor: 0 at the threshold, saturating towards 1 as
/// the deviation grows.
pub(crate) fn deviation_score(deviation: f64, threshold: f64) -> f64 {
    let scale = if threshold > 0.0 { threshold } else { 1.0 };
    let excess = (deviation - threshold).max(0.0) / scale;
    1.0 - (-excess).exp()
}

/// Cross-validation agreement factor: 1 when the full-data and mean fold
/// predictions coincide, decaying with their distance in threshold units.
pub(crate) fn cv_agreement_score(pred_full: f64, pred_cv: f64, threshold: f64) -> f64 {
    let scale = threshold.max(1e-6);
    (-(pred_cv - pred_full).abs() / scale).exp()
}

/// Seasonal plausibility factor: one minus the season's share of the
/// recession-segment pool. Seasons dominated by recessions are dry seasons,
/// where an apparent deviation is more likely noise. Uses only the segment
/// pool, which exists before any event is detected.
pub(crate) fn seasonal_score(season: Season, segment_share: &BTreeMap<Season, f64>) -> f64 {
    (1.0 - segment_share.get(&season).copied().unwrap_or(0.0)).clamp(0.0, 1.0)
}

/// Normalized, clamped combination of the three event factors.
pub(crate) fn combine_event(
    weights: &QualityWeights,
    deviation: f64,
    cross_validation: f64,
    seasonal: f64,
) -> f64 {
    let sum = weights.deviation + weights.cross_validation + weights.seasonal;
    let score = (weights.deviation * deviation
        + weights.cross_validation * cross_validation
        + weights.seasonal * seasonal)
        / sum;
    score.clamp(0.0, 1.0)
}

/// Overall calculation quality for an ERC run.
///
/// When no events were detected the event component drops out and the
/// remaining weights renormalize.
pub(crate) fn overall_quality(
    weights: &OverallWeights,
    curve_r_squared: f64,
    cv_r_squared: f64,
    mean_event_quality: Option<f64>,
) -> f64 {
    let curve = curve_r_squared.clamp(0.0, 1.0);
    let validation = cv_r_squared.clamp(0.0, 1.0);
    let (num, den) = match mean_event_quality {
        Some(q) => (
            weights.curve * curve + weights.validation * validation + weights.events * q,
            weights.curve + weights.validation + weights.events,
        ),
        None => (
            weights.curve * curve + weights.validation * validation,
            weights.curve + weights.validation,
        ),
    };
    if den <= 0.0 {
        return 0.0;
    }
    (num / den).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn deviation_score_saturates() {
        assert_relative_eq!(deviation_score(0.1, 0.1), 0.0, epsilon = 1e-12);
        let mid = deviation_score(0.2, 0.1);
        let big = deviation_score(1.0, 0.1);
        assert!(mid > 0.0 && mid < big);
        assert!(big < 1.0);
        assert!(deviation_score(100.0, 0.1) > 0.999);
    }

    #[test]
    fn deviation_score_handles_zero_threshold() {
        let s = deviation_score(0.5, 0.0);
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn cv_agreement_peaks_at_equality() {
        assert_relative_eq!(cv_agreement_score(5.0, 5.0, 0.1), 1.0, epsilon = 1e-12);
        assert!(cv_agreement_score(5.0, 5.2, 0.1) < cv_agreement_score(5.0, 5.05, 0.1));
    }

    #[test]
    fn seasonal_score_inverts_segment_share() {
        let mut share = BTreeMap::new();
        share.insert(Season::Summer, 0.75);
        share.insert(Season::Winter, 0.25);
        assert_relative_eq!(seasonal_score(Season::Summer, &share), 0.25, epsilon = 1e-12);
        assert_relative_eq!(seasonal_score(Season::Winter, &share), 0.75, epsilon = 1e-12);
        // A season with no segments at all is maximally plausible.
        assert_relative_eq!(seasonal_score(Season::Spring, &share), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn combined_score_is_bounded() {
        let w = QualityWeights::new();
        for d in [0.0, 0.3, 1.0] {
            for c in [0.0, 0.5, 1.0] {
                for s in [0.0, 0.7, 1.0] {
                    let q = combine_event(&w, d, c, s);
                    assert!((0.0..=1.0).contains(&q), "q = {q}");
                }
            }
        }
    }

    #[test]
    fn combined_score_is_monotone_in_each_factor() {
        let w = QualityWeights::new();
        assert!(combine_event(&w, 0.9, 0.5, 0.5) > combine_event(&w, 0.1, 0.5, 0.5));
        assert!(combine_event(&w, 0.5, 0.9, 0.5) > combine_event(&w, 0.5, 0.1, 0.5));
        assert!(combine_event(&w, 0.5, 0.5, 0.9) > combine_event(&w, 0.5, 0.5, 0.1));
    }

    #[test]
    fn overall_quality_renormalizes_without_events() {
        let w = OverallWeights::new();
        let q = overall_quality(&w, 0.8, 0.6, None);
        // (0.4*0.8 + 0.3*0.6) / 0.7
        assert_relative_eq!(q, 0.5 / 0.7, epsilon = 1e-12);
    }

    #[test]
    fn overall_quality_clamps_negative_r2() {
        let w = OverallWeights::new();
        let q = overall_quality(&w, -3.0, -1.0, Some(0.5));
        assert!((0.0..=1.0).contains(&q));
    }

    #[test]
    fn weights_validate() {
        assert!(QualityWeights::new().validate().is_ok());
        assert!(QualityWeights::new().with_deviation(-1.0).validate().is_err());
        assert!(
            QualityWeights::new()
                .with_deviation(0.0)
                .with_cross_validation(0.0)
                .with_seasonal(0.0)
                .validate()
                .is_err()
        );
        assert!(OverallWeights::new().validate().is_ok());
        assert!(OverallWeights::new().with_curve(f64::NAN).validate().is_err());
    }
}
