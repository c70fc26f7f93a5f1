//! Trailing-window recession baselines for rise-above-recession analysis.

use naiad_calendar::days_between;
use naiad_timeseries::TimeSeries;

use crate::config::SegmentConfig;
use crate::error::SegmentError;

/// Computes the antecedent recession baseline for every reading.
///
/// For reading `i`, a least-squares recession line is fitted to the readings
/// strictly before `i` within the trailing `antecedent_period` window and
/// extrapolated to reading `i`'s timestamp. With fewer than two usable
/// trailing points the previous level stands in; the first reading's
/// baseline is its own level (zero rise).
///
/// Unlike the recession scan, this mode never commits to discrete segments.
///
/// # Errors
///
/// Returns a [`SegmentError`] only for an invalid configuration.
#[tracing::instrument(skip_all, fields(n_readings = series.len()))]
pub fn antecedent_baselines(
    series: &TimeSeries,
    config: &SegmentConfig,
) -> Result<Vec<f64>, SegmentError> {
    config.validate()?;

    let timestamps = series.timestamps();
    let levels = series.levels();
    let n = series.len();
    let period = config.antecedent_period();

    let mut baselines = Vec::with_capacity(n);
    let mut window_start = 0usize;

    for i in 0..n {
        while window_start < i && days_between(timestamps[window_start], timestamps[i]) > period {
            window_start += 1;
        }
        if i == 0 {
            baselines.push(levels[0]);
            continue;
        }

        // Regression coordinates relative to reading i, so the baseline is
        // the intercept at x = 0.
        let x: Vec<f64> = (window_start..i)
            .map(|j| days_between(timestamps[i], timestamps[j]))
            .collect();
        let y: Vec<f64> = (window_start..i).map(|j| levels[j]).collect();

        let baseline = match naiad_stats::linear_regression(&x, &y) {
            Some((intercept, _slope)) => intercept,
            None => levels[i - 1],
        };
        baselines.push(baseline);
    }

    Ok(baselines)
}
