//! Seasonal (multi-segment) curve fitting.

use std::collections::BTreeMap;

use naiad_calendar::Season;
use naiad_segments::RecessionSegment;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::FitConfig;
use crate::error::FitError;
use crate::fit::{MIN_SEGMENTS, fit_points};
use crate::master::MasterCurve;

/// One inner curve per season, with skip accounting.
///
/// Seasons with fewer than the configured minimum of segments receive no
/// curve and are recorded in `skipped_seasons`; seasons whose fit failed on
/// degenerate data are additionally counted in `n_failed_fits`.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalCurves {
    curves: BTreeMap<Season, MasterCurve>,
    skipped_seasons: Vec<Season>,
    n_failed_fits: usize,
}

impl SeasonalCurves {
    /// Returns the fitted curves keyed by season.
    pub fn curves(&self) -> &BTreeMap<Season, MasterCurve> {
        &self.curves
    }

    /// Returns the seasons that received no curve.
    pub fn skipped_seasons(&self) -> &[Season] {
        &self.skipped_seasons
    }

    /// Returns the number of seasons where fitting was attempted but failed.
    pub fn n_failed_fits(&self) -> usize {
        self.n_failed_fits
    }

    /// Mean R² across the fitted seasonal curves.
    pub fn mean_r_squared(&self) -> f64 {
        let r: Vec<f64> = self.curves.values().map(|c| c.r_squared()).collect();
        naiad_stats::mean(&r)
    }

    /// The curve applicable to a season.
    ///
    /// Falls back to the nearest fitted season by circular month distance
    /// when the requested season was skipped; ties resolve to the earlier
    /// season in map order.
    pub fn curve_for(&self, season: Season) -> &MasterCurve {
        if let Some(curve) = self.curves.get(&season) {
            return curve;
        }
        self.curves
            .iter()
            .min_by_key(|(s, _)| (season.month_distance(**s), **s))
            .map(|(_, c)| c)
            .expect("seasonal fit produces at least one curve")
    }

    /// Predicted level at `t` days since recession onset, using the curve
    /// applicable to `season`.
    pub fn evaluate(&self, season: Season, t: f64) -> f64 {
        self.curve_for(season).evaluate(t)
    }
}

/// Fits one inner curve per season of the segment start dates.
///
/// Partitions run independently (they read disjoint segment subsets), so the
/// per-season fits execute in parallel.
///
/// # Errors
///
/// Returns [`FitError::InsufficientSegments`] for fewer than
/// [`MIN_SEGMENTS`] segments overall, or [`FitError::NoFittableSeason`] when
/// every season falls below the per-season minimum or fails to fit.
#[tracing::instrument(skip_all, fields(n_segments = segments.len()))]
pub fn fit_seasonal(
    segments: &[RecessionSegment],
    config: &FitConfig,
) -> Result<SeasonalCurves, FitError> {
    config.validate()?;
    if segments.len() < MIN_SEGMENTS {
        return Err(FitError::InsufficientSegments {
            found: segments.len(),
            required: MIN_SEGMENTS,
        });
    }

    let mut groups: BTreeMap<Season, Vec<&RecessionSegment>> = BTreeMap::new();
    for segment in segments {
        groups.entry(segment.season()).or_default().push(segment);
    }

    // Every season is considered; seasons without enough segments
    // (including none at all) are recorded as skipped.
    let mut skipped_seasons = Vec::new();
    let mut fittable: Vec<(Season, Vec<&RecessionSegment>)> = Vec::new();
    for season in Season::all() {
        let group = groups.remove(&season).unwrap_or_default();
        if group.len() < config.min_segments_per_season() {
            debug!(season = season.label(), n = group.len(), "season skipped");
            skipped_seasons.push(season);
        } else {
            fittable.push((season, group));
        }
    }

    let fits: Vec<(Season, Result<MasterCurve, FitError>)> = fittable
        .par_iter()
        .map(|(season, group)| {
            let points: Vec<(f64, f64)> = group
                .iter()
                .flat_map(|s| s.points().iter().copied())
                .collect();
            let fit = fit_points(
                &points,
                config.seasonal_inner(),
                config.poly_degree(),
                Some(*season),
                group.len(),
            );
            (*season, fit)
        })
        .collect();

    let mut curves = BTreeMap::new();
    let mut n_failed_fits = 0usize;
    for (season, fit) in fits {
        match fit {
            Ok(curve) => {
                curves.insert(season, curve);
            }
            Err(_) => {
                n_failed_fits += 1;
                skipped_seasons.push(season);
            }
        }
    }
    skipped_seasons.sort();

    if curves.is_empty() {
        return Err(FitError::NoFittableSeason {
            n_segments: segments.len(),
        });
    }

    Ok(SeasonalCurves {
        curves,
        skipped_seasons,
        n_failed_fits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_type::CurveType;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn decay_segment(start: NaiveDateTime, l0: f64, a: f64) -> RecessionSegment {
        let points: Vec<(NaiveDateTime, f64)> = (0..15)
            .map(|i| (start + Duration::days(i), l0 * (-a * i as f64).exp()))
            .collect();
        RecessionSegment::from_points(&points).unwrap()
    }

    /// Three winter and three summer segments with different decay rates.
    fn two_season_segments() -> Vec<RecessionSegment> {
        vec![
            decay_segment(ts(2000, 1, 5), 10.0, 0.02),
            decay_segment(ts(2001, 1, 8), 10.0, 0.02),
            decay_segment(ts(2002, 2, 1), 10.0, 0.02),
            decay_segment(ts(2000, 7, 5), 10.0, 0.08),
            decay_segment(ts(2001, 7, 8), 10.0, 0.08),
            decay_segment(ts(2002, 8, 1), 10.0, 0.08),
        ]
    }

    #[test]
    fn fits_one_curve_per_populated_season() {
        let curves = fit_seasonal(&two_season_segments(), &FitConfig::new()).unwrap();
        assert_eq!(curves.curves().len(), 2);
        assert!(curves.curves().contains_key(&Season::Winter));
        assert!(curves.curves().contains_key(&Season::Summer));
        assert_eq!(curves.skipped_seasons(), &[Season::Spring, Season::Autumn]);
        assert_eq!(curves.n_failed_fits(), 0);

        // Each season recovers its own decay rate.
        let winter = &curves.curves()[&Season::Winter];
        let summer = &curves.curves()[&Season::Summer];
        assert!((winter.parameters()[1] - 0.02).abs() < 0.001);
        assert!((summer.parameters()[1] - 0.08).abs() < 0.001);
        assert_eq!(winter.season(), Some(Season::Winter));
    }

    #[test]
    fn nearest_season_fallback() {
        let curves = fit_seasonal(&two_season_segments(), &FitConfig::new()).unwrap();
        // Spring (mid-month Apr) is 3 months from both winter and summer;
        // the tie resolves to the earlier season in map order.
        let c = curves.curve_for(Season::Spring);
        assert_eq!(c.season(), Some(Season::Winter));
        // Autumn is likewise equidistant; same rule.
        let c = curves.curve_for(Season::Autumn);
        assert_eq!(c.season(), Some(Season::Winter));
    }

    #[test]
    fn evaluation_uses_the_seasonal_curve() {
        let curves = fit_seasonal(&two_season_segments(), &FitConfig::new()).unwrap();
        let winter = curves.evaluate(Season::Winter, 10.0);
        let summer = curves.evaluate(Season::Summer, 10.0);
        // The summer decay is steeper, so its prediction is lower.
        assert!(summer < winter);
    }

    #[test]
    fn per_season_minimum_applies() {
        // Four winter segments, two summer: summer is skipped.
        let mut segments = vec![
            decay_segment(ts(2000, 1, 5), 10.0, 0.02),
            decay_segment(ts(2001, 1, 8), 10.0, 0.02),
            decay_segment(ts(2002, 2, 1), 10.0, 0.02),
            decay_segment(ts(2003, 1, 20), 10.0, 0.02),
        ];
        segments.push(decay_segment(ts(2000, 7, 5), 10.0, 0.08));
        segments.push(decay_segment(ts(2001, 7, 8), 10.0, 0.08));

        let curves = fit_seasonal(&segments, &FitConfig::new()).unwrap();
        assert!(curves.curves().contains_key(&Season::Winter));
        assert!(!curves.curves().contains_key(&Season::Summer));
        assert!(curves.skipped_seasons().contains(&Season::Summer));
    }

    #[test]
    fn all_seasons_below_minimum_is_an_error() {
        // Three segments spread over three seasons: none reaches the
        // default per-season minimum of 3.
        let segments = vec![
            decay_segment(ts(2000, 1, 5), 10.0, 0.02),
            decay_segment(ts(2000, 4, 5), 10.0, 0.04),
            decay_segment(ts(2000, 7, 5), 10.0, 0.08),
        ];
        let err = fit_seasonal(&segments, &FitConfig::new()).unwrap_err();
        assert_eq!(err, FitError::NoFittableSeason { n_segments: 3 });
    }

    #[test]
    fn inner_curve_type_is_respected() {
        let cfg = FitConfig::new().with_seasonal_inner(CurveType::Linear);
        let curves = fit_seasonal(&two_season_segments(), &cfg).unwrap();
        for curve in curves.curves().values() {
            assert_eq!(curve.curve_type(), CurveType::Linear);
        }
    }
}
