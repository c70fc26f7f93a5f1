//! Tolerance-rule scan that extracts recession segments from a series.

use naiad_calendar::days_between;
use naiad_timeseries::TimeSeries;
use tracing::debug;

use crate::config::SegmentConfig;
use crate::error::SegmentError;
use crate::segment::RecessionSegment;

/// Scans the series for recession segments.
///
/// A candidate segment extends while each successive reading is at most
/// `fluctuation_tolerance` above the previous one (ties continue the
/// segment, so longer segments are preferred over splitting) and the reading
/// is not blocked by a recent precipitation event. A candidate is kept only
/// if it spans at least `min_recession_length` days.
///
/// A series too short to contain any qualifying segment yields an empty
/// vector, not an error; whether that is fatal is the curve-fitting stage's
/// call.
///
/// # Errors
///
/// Returns a [`SegmentError`] only for an invalid configuration.
#[tracing::instrument(skip_all, fields(n_readings = series.len()))]
pub fn identify_segments(
    series: &TimeSeries,
    config: &SegmentConfig,
) -> Result<Vec<RecessionSegment>, SegmentError> {
    config.validate()?;

    let levels = series.levels();
    let n = series.len();
    let blocked = blocked_mask(series, config);

    let mut segments = Vec::new();
    let mut start: Option<usize> = None;

    for i in 0..n {
        let continues = match start {
            Some(_) => !blocked[i] && levels[i] <= levels[i - 1] + config.fluctuation_tolerance(),
            None => false,
        };
        if continues {
            continue;
        }
        if let Some(s) = start.take()
            && let Some(seg) = close_candidate(series, s, i - 1, config)?
        {
            segments.push(seg);
        }
        if !blocked[i] {
            start = Some(i);
        }
    }
    if let Some(s) = start
        && let Some(seg) = close_candidate(series, s, n - 1, config)?
    {
        segments.push(seg);
    }

    debug!(n_segments = segments.len(), "segment scan complete");
    Ok(segments)
}

/// Turns the candidate run `[start..=end]` into a segment if it qualifies.
fn close_candidate(
    series: &TimeSeries,
    start: usize,
    end: usize,
    config: &SegmentConfig,
) -> Result<Option<RecessionSegment>, SegmentError> {
    if end <= start {
        return Ok(None);
    }
    let timestamps = series.timestamps();
    let span = days_between(timestamps[start], timestamps[end]);
    if span < config.min_recession_length() {
        return Ok(None);
    }
    let points: Vec<_> = (start..=end)
        .map(|i| (timestamps[i], series.levels()[i]))
        .collect();
    RecessionSegment::from_points(&points).map(Some)
}

/// Marks every reading at, or within the post-precipitation lag after, a
/// precipitation event exceeding the tolerance. Blocked readings can neither
/// join nor start a segment.
fn blocked_mask(series: &TimeSeries, config: &SegmentConfig) -> Vec<bool> {
    let n = series.len();
    let mut blocked = vec![false; n];
    let Some(precip) = series.precipitation() else {
        return blocked;
    };
    let timestamps = series.timestamps();
    for j in 0..n {
        if precip[j] <= config.precipitation_tolerance() {
            continue;
        }
        blocked[j] = true;
        let mut i = j + 1;
        while i < n && days_between(timestamps[j], timestamps[i]) <= config.post_precipitation_lag()
        {
            blocked[i] = true;
            i += 1;
        }
    }
    blocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use naiad_timeseries::Reading;

    fn ts(day0: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(day0)
    }

    fn series(levels: &[f64]) -> TimeSeries {
        let readings: Vec<Reading> = levels
            .iter()
            .enumerate()
            .map(|(i, &l)| Reading::new(ts(i as i64), l))
            .collect();
        TimeSeries::from_readings(&readings, 10, 1).unwrap()
    }

    fn series_with_precip(levels: &[f64], precip: &[f64]) -> TimeSeries {
        let readings: Vec<Reading> = levels
            .iter()
            .zip(precip)
            .enumerate()
            .map(|(i, (&l, &p))| Reading::with_precipitation(ts(i as i64), l, p))
            .collect();
        TimeSeries::from_readings(&readings, 10, 1).unwrap()
    }

    fn declining(n: usize) -> Vec<f64> {
        (0..n).map(|i| 10.0 - i as f64 * 0.01).collect()
    }

    #[test]
    fn monotone_decline_is_one_segment() {
        let s = series(&declining(30));
        let segs = identify_segments(&s, &SegmentConfig::new()).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].n_points(), 30);
        assert_eq!(segs[0].length_days(), 29.0);
    }

    #[test]
    fn short_series_yields_no_segments() {
        let s = series(&declining(5));
        let segs = identify_segments(&s, &SegmentConfig::new()).unwrap();
        assert!(segs.is_empty());
    }

    #[test]
    fn fluctuation_within_tolerance_continues() {
        let mut levels = declining(30);
        levels[15] = levels[14] + 0.02; // exactly at the default tolerance
        let s = series(&levels);
        let segs = identify_segments(&s, &SegmentConfig::new()).unwrap();
        assert_eq!(segs.len(), 1, "tie must favor continuation");
        assert_eq!(segs[0].n_points(), 30);
    }

    #[test]
    fn rise_beyond_tolerance_splits() {
        let mut levels = declining(40);
        for l in levels.iter_mut().skip(20) {
            *l += 1.0; // abrupt recharge rise at reading 20
        }
        let s = series(&levels);
        let segs = identify_segments(&s, &SegmentConfig::new()).unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].n_points(), 20);
        assert_eq!(segs[1].n_points(), 20);
    }

    #[test]
    fn precipitation_event_blocks_lag_window() {
        let levels = declining(40);
        let mut precip = vec![0.0; 40];
        precip[20] = 0.5; // storm on day 20, default lag 2 days
        let s = series_with_precip(&levels, &precip);
        let segs = identify_segments(&s, &SegmentConfig::new()).unwrap();
        // Days 20..=22 are blocked; both sides still qualify (>= 10 days).
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].n_points(), 20);
        assert_eq!(segs[1].n_points(), 17);
    }

    #[test]
    fn sub_tolerance_precipitation_is_ignored() {
        let levels = declining(30);
        let precip = vec![0.04; 30]; // all below the 0.05 default tolerance
        let s = series_with_precip(&levels, &precip);
        let segs = identify_segments(&s, &SegmentConfig::new()).unwrap();
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn segment_exactly_at_min_length_is_kept() {
        // 11 daily readings span exactly 10.0 days.
        let s = series(&declining(11));
        let segs = identify_segments(&s, &SegmentConfig::new()).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].length_days(), 10.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let s = series(&declining(30));
        let cfg = SegmentConfig::new().with_min_recession_length(-1.0);
        assert!(identify_segments(&s, &cfg).is_err());
    }
}
