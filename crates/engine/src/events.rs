//! Event detection: rises above the antecedent baseline (RISE) and
//! deviations above the master curve (MRC/ERC).

use std::collections::BTreeMap;

use naiad_calendar::{Season, days_between};
use naiad_curve::{CurveType, MasterCurve, SeasonalCurves, evaluate_params};
use naiad_segments::RecessionSegment;
use naiad_timeseries::TimeSeries;
use naiad_validate::CrossValidationResult;
use tracing::debug;

use crate::params::Parameters;
use crate::quality;
use crate::result::RechargeEvent;

/// Feet-of-water-level to inches-of-recharge conversion factor.
const FEET_TO_INCHES: f64 = 12.0;

/// The fitted baseline model of an MRC/ERC run: one pooled curve, or one
/// curve per season.
#[derive(Debug)]
pub(crate) enum FittedCurves {
    Single(MasterCurve),
    Seasonal(SeasonalCurves),
}

impl FittedCurves {
    /// Predicted level at `t` days since recession onset.
    pub(crate) fn predict(&self, season: Season, t: f64) -> f64 {
        match self {
            FittedCurves::Single(curve) => curve.evaluate(t),
            FittedCurves::Seasonal(curves) => curves.evaluate(season, t),
        }
    }

    /// Mean R² across the member curves.
    pub(crate) fn mean_r_squared(&self) -> f64 {
        match self {
            FittedCurves::Single(curve) => curve.r_squared(),
            FittedCurves::Seasonal(curves) => curves.mean_r_squared(),
        }
    }

    /// The member curves, flattened for the result record.
    pub(crate) fn to_curve_vec(&self) -> Vec<MasterCurve> {
        match self {
            FittedCurves::Single(curve) => vec![curve.clone()],
            FittedCurves::Seasonal(curves) => curves.curves().values().cloned().collect(),
        }
    }

    /// Seasons that received no curve (seasonal fits only).
    pub(crate) fn skipped_seasons(&self) -> &[Season] {
        match self {
            FittedCurves::Single(_) => &[],
            FittedCurves::Seasonal(curves) => curves.skipped_seasons(),
        }
    }
}

/// Season of reading `i`. Months from chrono are always valid.
fn reading_season(series: &TimeSeries, i: usize) -> Season {
    Season::from_month(series.month(i)).expect("month in 1..=12")
}

/// Share of the recession-segment pool per season, for the seasonal
/// plausibility factor.
pub(crate) fn segment_share(segments: &[RecessionSegment]) -> BTreeMap<Season, f64> {
    let mut counts: BTreeMap<Season, usize> = BTreeMap::new();
    for segment in segments {
        *counts.entry(segment.season()).or_default() += 1;
    }
    let total = segments.len().max(1) as f64;
    counts
        .into_iter()
        .map(|(season, n)| (season, n as f64 / total))
        .collect()
}

/// RISE detection: a reading whose rise above its antecedent baseline
/// exceeds the threshold becomes an event.
pub(crate) fn detect_rise(
    series: &TimeSeries,
    baselines: &[f64],
    params: &Parameters,
) -> Vec<RechargeEvent> {
    let mut events = Vec::new();
    for i in 0..series.len() {
        let rise = series.levels()[i] - baselines[i];
        if rise > params.threshold() {
            events.push(RechargeEvent {
                event_date: series.timestamps()[i],
                water_year: series.water_years()[i],
                season: reading_season(series, i),
                observed_level: series.levels()[i],
                reference_level: baselines[i],
                deviation: rise,
                recharge_inches: rise * params.specific_yield() * FEET_TO_INCHES,
                quality_score: None,
            });
        }
    }
    debug!(n_events = events.len(), "rise detection complete");
    events
}

/// MRC/ERC detection: the master curve, evaluated at the days elapsed since
/// the most recent recession-segment start, is the no-recharge baseline;
/// readings deviating above it beyond the threshold become events.
///
/// Readings before the first segment start have no baseline and are
/// skipped. When cross-validation context is supplied (ERC), every event
/// gets a quality score.
pub(crate) fn detect_deviation(
    series: &TimeSeries,
    segments: &[RecessionSegment],
    curves: &FittedCurves,
    cv: Option<(&CrossValidationResult, CurveType)>,
    params: &Parameters,
) -> Vec<RechargeEvent> {
    let share = cv.is_some().then(|| segment_share(segments));
    let mut events = Vec::new();
    let mut current_segment: Option<usize> = None;

    for i in 0..series.len() {
        let ts = series.timestamps()[i];
        while current_segment.map_or(0, |s| s + 1) < segments.len()
            && segments[current_segment.map_or(0, |s| s + 1)].start_ts() <= ts
        {
            current_segment = Some(current_segment.map_or(0, |s| s + 1));
        }
        let Some(seg_idx) = current_segment else {
            continue;
        };

        let t = days_between(segments[seg_idx].start_ts(), ts);
        let season = reading_season(series, i);
        let predicted = curves.predict(season, t);
        let deviation = series.levels()[i] - predicted;
        if deviation <= params.threshold() {
            continue;
        }

        let quality_score = cv.map(|(cv_result, cv_type)| {
            let d = quality::deviation_score(deviation, params.threshold());
            let pred_cv = mean_fold_prediction(cv_result, cv_type, t);
            let c = quality::cv_agreement_score(predicted, pred_cv, params.threshold());
            let s = quality::seasonal_score(
                season,
                share.as_ref().expect("share computed alongside cv"),
            );
            quality::combine_event(params.quality_weights(), d, c, s)
        });

        events.push(RechargeEvent {
            event_date: ts,
            water_year: series.water_years()[i],
            season,
            observed_level: series.levels()[i],
            reference_level: predicted,
            deviation,
            recharge_inches: deviation * params.specific_yield() * FEET_TO_INCHES,
            quality_score,
        });
    }
    debug!(n_events = events.len(), "deviation detection complete");
    events
}

/// Mean prediction of the cross-validated fold curves at recession age `t`.
fn mean_fold_prediction(cv: &CrossValidationResult, cv_type: CurveType, t: f64) -> f64 {
    let predictions: Vec<f64> = cv
        .folds()
        .iter()
        .map(|fold| evaluate_params(cv_type, &fold.parameters, t))
        .collect();
    naiad_stats::mean(&predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Method;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use naiad_curve::{FitConfig, fit_master_curve};
    use naiad_segments::{SegmentConfig, identify_segments};
    use naiad_timeseries::Reading;

    fn ts(d: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(d)
    }

    /// Three clean 30-day recessions from 10.0 ft (0.01 ft/day), each
    /// followed by a one-reading +1.0 ft storm spike carrying enough
    /// precipitation to block it from segment membership, with gaps in
    /// between so every reading sits either on a recession track or on a
    /// spike.
    fn spike_series() -> TimeSeries {
        let mut readings = Vec::new();
        let recession = |readings: &mut Vec<Reading>, start: i64| {
            for i in 0..30i64 {
                readings.push(Reading::with_precipitation(
                    ts(start + i),
                    10.0 - 0.01 * i as f64,
                    0.0,
                ));
            }
        };
        recession(&mut readings, 0);
        readings.push(Reading::with_precipitation(ts(30), 10.70, 0.5));
        recession(&mut readings, 50);
        readings.push(Reading::with_precipitation(ts(80), 10.70, 0.5));
        recession(&mut readings, 100);
        TimeSeries::from_readings(&readings, 10, 1).unwrap()
    }

    #[test]
    fn rise_events_honor_the_conversion_invariant() {
        let series = spike_series();
        let baselines =
            naiad_segments::antecedent_baselines(&series, &SegmentConfig::new()).unwrap();
        let params = Parameters::new(Method::Rise)
            .with_threshold(0.5)
            .with_specific_yield(0.2);
        let events = detect_rise(&series, &baselines, &params);
        assert_eq!(events.len(), 2);
        for event in &events {
            // The trailing fit extrapolates the 0.01 ft/day track exactly.
            assert_relative_eq!(event.deviation, 1.0, epsilon = 1e-9);
            assert_relative_eq!(
                event.recharge_inches,
                event.deviation * 0.2 * 12.0,
                epsilon = 1e-12
            );
            assert!(event.quality_score.is_none());
        }
    }

    #[test]
    fn deviation_events_reference_the_master_curve() {
        let series = spike_series();
        let segments = identify_segments(&series, &SegmentConfig::new()).unwrap();
        assert_eq!(segments.len(), 3);
        let curve = fit_master_curve(
            &segments,
            naiad_curve::CurveType::Exponential,
            &FitConfig::new(),
        )
        .unwrap();
        let params = Parameters::new(Method::Mrc)
            .with_threshold(0.1)
            .with_specific_yield(0.2);
        let events = detect_deviation(
            &series,
            &segments,
            &FittedCurves::Single(curve),
            None,
            &params,
        );
        // Only the two spike readings deviate beyond the threshold; each
        // sits ~1 ft above the curve at 30 days of recession age.
        assert_eq!(events.len(), 2);
        for event in &events {
            assert_relative_eq!(event.deviation, 1.0, epsilon = 0.01);
            assert_relative_eq!(
                event.recharge_inches,
                event.deviation * 0.2 * 12.0,
                epsilon = 1e-12
            );
            assert!(event.quality_score.is_none());
        }
    }

    #[test]
    fn readings_before_the_first_segment_are_skipped() {
        // Rising prefix: no segment covers it.
        let mut readings = Vec::new();
        for d in 0..5i64 {
            readings.push(Reading::new(ts(d), 5.0 + d as f64));
        }
        for d in 5..40i64 {
            readings.push(Reading::new(ts(d), 20.0 - d as f64 * 0.01));
        }
        let series = TimeSeries::from_readings(&readings, 10, 1).unwrap();
        let segments = identify_segments(&series, &SegmentConfig::new()).unwrap();
        assert_eq!(segments.len(), 1);
        let curve = fit_master_curve(
            &[segments[0].clone(), segments[0].clone(), segments[0].clone()],
            naiad_curve::CurveType::Exponential,
            &FitConfig::new(),
        )
        .unwrap();
        let params = Parameters::new(Method::Mrc).with_threshold(0.0);
        let events = detect_deviation(
            &series,
            &segments,
            &FittedCurves::Single(curve),
            None,
            &params,
        );
        for event in &events {
            assert!(event.event_date >= segments[0].start_ts());
        }
    }

    #[test]
    fn segment_share_sums_to_one() {
        let series = spike_series();
        let segments = identify_segments(&series, &SegmentConfig::new()).unwrap();
        let share = segment_share(&segments);
        let total: f64 = share.values().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }
}
