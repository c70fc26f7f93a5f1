//! Resampling, smoothing, and water-year labelling.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use crate::config::{AggregateMethod, DownsampleRule, PreprocessConfig};
use crate::error::SeriesError;
use crate::reading::Reading;
use crate::series::TimeSeries;

/// Builds a validated [`TimeSeries`] from raw readings.
///
/// Applies, in order: downsampling into hourly/daily buckets (levels by the
/// configured method, precipitation by sum), centered moving-average
/// smoothing of the levels, and water-year labelling.
///
/// # Errors
///
/// Returns [`SeriesError::Empty`] if no readings are provided, a validation
/// error from the config, or a structural error from series construction
/// (unsorted or duplicate timestamps, non-finite values).
#[tracing::instrument(skip_all, fields(n_readings = readings.len()))]
pub fn preprocess(readings: &[Reading], config: &PreprocessConfig) -> Result<TimeSeries, SeriesError> {
    config.validate()?;

    if readings.is_empty() {
        return Err(SeriesError::Empty);
    }

    let bucketed = match config.downsample() {
        DownsampleRule::None => readings.to_vec(),
        rule => downsample(readings, rule, config.method())?,
    };

    let smoothed = match config.smoothing_window() {
        Some(window) => smooth(&bucketed, window),
        None => bucketed,
    };

    debug!(
        n_out = smoothed.len(),
        "preprocessed series"
    );

    TimeSeries::from_readings(
        &smoothed,
        config.water_year_start_month(),
        config.water_year_start_day(),
    )
}

/// Truncates a timestamp to the start of its bucket.
fn bucket_start(ts: NaiveDateTime, rule: DownsampleRule) -> NaiveDateTime {
    match rule {
        DownsampleRule::None => ts,
        DownsampleRule::Hourly => {
            let hour = NaiveTime::from_hms_opt(ts.time().hour(), 0, 0).expect("hour in 0..=23");
            ts.date().and_time(hour)
        }
        DownsampleRule::Daily => ts.date().and_time(NaiveTime::MIN),
    }
}

/// Aggregates consecutive readings that share a bucket.
///
/// Input must be ordered by timestamp (validated downstream as well); the
/// ordering makes buckets contiguous, so a single pass suffices.
fn downsample(
    readings: &[Reading],
    rule: DownsampleRule,
    method: AggregateMethod,
) -> Result<Vec<Reading>, SeriesError> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < readings.len() {
        let start = bucket_start(readings[i].timestamp, rule);
        let mut j = i + 1;
        while j < readings.len() && bucket_start(readings[j].timestamp, rule) == start {
            j += 1;
        }
        let bucket = &readings[i..j];

        let level = match method {
            AggregateMethod::Mean => {
                naiad_stats::mean(&bucket.iter().map(|r| r.water_level).collect::<Vec<_>>())
            }
            AggregateMethod::Median => {
                let mut levels: Vec<f64> = bucket.iter().map(|r| r.water_level).collect();
                levels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                naiad_stats::median(&levels)
            }
            AggregateMethod::Last => bucket[bucket.len() - 1].water_level,
        };

        let precip = if bucket.iter().any(|r| r.precipitation.is_some()) {
            Some(bucket.iter().filter_map(|r| r.precipitation).sum())
        } else {
            None
        };

        out.push(Reading {
            timestamp: start,
            water_level: level,
            precipitation: precip,
        });
        i = j;
    }
    Ok(out)
}

/// Centered moving average of the levels with an odd window, clamped at the
/// series edges. Timestamps and precipitation are untouched.
fn smooth(readings: &[Reading], window: usize) -> Vec<Reading> {
    let half = window / 2;
    let n = readings.len();
    readings
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(n);
            let window_levels: Vec<f64> =
                readings[lo..hi].iter().map(|r| r.water_level).collect();
            Reading {
                water_level: naiad_stats::mean(&window_levels),
                ..*r
            }
        })
        .collect()
}
