//! Preprocessing configuration.

use serde::Serialize;

use crate::error::SeriesError;

/// Downsampling bucket rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownsampleRule {
    /// Keep the series at its native resolution.
    #[default]
    None,
    /// Aggregate readings into hourly buckets.
    Hourly,
    /// Aggregate readings into daily buckets.
    Daily,
}

/// Aggregation applied to the water levels inside a downsampling bucket.
///
/// Precipitation always aggregates by sum (a bucket's physical total).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateMethod {
    /// Arithmetic mean of the bucket's levels.
    #[default]
    Mean,
    /// Median of the bucket's levels.
    Median,
    /// Last level observed in the bucket.
    Last,
}

/// Configuration for [`preprocess`](crate::preprocess).
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```ignore
/// use naiad_timeseries::{AggregateMethod, DownsampleRule, PreprocessConfig};
///
/// let config = PreprocessConfig::new()
///     .with_downsample(DownsampleRule::Daily)
///     .with_method(AggregateMethod::Median)
///     .with_smoothing_window(Some(3));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessConfig {
    /// Downsampling bucket rule.
    downsample: DownsampleRule,
    /// Level aggregation inside a bucket.
    method: AggregateMethod,
    /// Centered moving-average window (odd, >= 3), or no smoothing.
    smoothing_window: Option<usize>,
    /// Water-year start month (1..=12).
    water_year_start_month: u8,
    /// Water-year start day, valid for the start month.
    water_year_start_day: u8,
}

impl PreprocessConfig {
    /// Creates a configuration with defaults: no downsampling, mean
    /// aggregation, no smoothing, October 1 water-year start.
    pub fn new() -> Self {
        Self {
            downsample: DownsampleRule::None,
            method: AggregateMethod::Mean,
            smoothing_window: None,
            water_year_start_month: 10,
            water_year_start_day: 1,
        }
    }

    /// Sets the downsampling rule.
    pub fn with_downsample(mut self, rule: DownsampleRule) -> Self {
        self.downsample = rule;
        self
    }

    /// Sets the level aggregation method.
    pub fn with_method(mut self, method: AggregateMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets or clears the smoothing window.
    pub fn with_smoothing_window(mut self, window: Option<usize>) -> Self {
        self.smoothing_window = window;
        self
    }

    /// Sets the water-year start date.
    pub fn with_water_year_start(mut self, month: u8, day: u8) -> Self {
        self.water_year_start_month = month;
        self.water_year_start_day = day;
        self
    }

    /// Returns the downsampling rule.
    pub fn downsample(&self) -> DownsampleRule {
        self.downsample
    }

    /// Returns the level aggregation method.
    pub fn method(&self) -> AggregateMethod {
        self.method
    }

    /// Returns the smoothing window, if smoothing is enabled.
    pub fn smoothing_window(&self) -> Option<usize> {
        self.smoothing_window
    }

    /// Returns the water-year start month.
    pub fn water_year_start_month(&self) -> u8 {
        self.water_year_start_month
    }

    /// Returns the water-year start day.
    pub fn water_year_start_day(&self) -> u8 {
        self.water_year_start_day
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidSmoothingWindow`] for an even or
    /// too-small window, or a calendar error for an invalid water-year
    /// start date.
    pub fn validate(&self) -> Result<(), SeriesError> {
        if let Some(w) = self.smoothing_window
            && (w < 3 || w % 2 == 0)
        {
            return Err(SeriesError::InvalidSmoothingWindow { window: w });
        }
        let probe = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid probe date");
        naiad_calendar::water_year(probe, self.water_year_start_month, self.water_year_start_day)?;
        Ok(())
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self::new()
    }
}
