//! Segment identification configuration.

use crate::error::SegmentError;

/// Tolerances and windows for segment identification.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```ignore
/// use naiad_segments::SegmentConfig;
///
/// let config = SegmentConfig::new()
///     .with_min_recession_length(14.0)
///     .with_fluctuation_tolerance(0.01);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Minimum segment span in days.
    min_recession_length: f64,
    /// Permitted positive level fluctuation (feet) between successive
    /// readings within a segment.
    fluctuation_tolerance: f64,
    /// Precipitation (inches) above which a reading counts as a
    /// precipitation event.
    precipitation_tolerance: f64,
    /// Days after a precipitation event during which readings cannot join a
    /// segment.
    post_precipitation_lag: f64,
    /// Trailing window (days) for the antecedent baseline fit.
    antecedent_period: f64,
}

impl SegmentConfig {
    /// Creates a configuration with defaults: 10-day minimum length, 0.02 ft
    /// fluctuation tolerance, 0.05 in precipitation tolerance, 2-day
    /// post-precipitation lag, 7-day antecedent period.
    pub fn new() -> Self {
        Self {
            min_recession_length: 10.0,
            fluctuation_tolerance: 0.02,
            precipitation_tolerance: 0.05,
            post_precipitation_lag: 2.0,
            antecedent_period: 7.0,
        }
    }

    /// Sets the minimum segment span in days.
    pub fn with_min_recession_length(mut self, days: f64) -> Self {
        self.min_recession_length = days;
        self
    }

    /// Sets the fluctuation tolerance in feet.
    pub fn with_fluctuation_tolerance(mut self, tol: f64) -> Self {
        self.fluctuation_tolerance = tol;
        self
    }

    /// Sets the precipitation event threshold in inches.
    pub fn with_precipitation_tolerance(mut self, tol: f64) -> Self {
        self.precipitation_tolerance = tol;
        self
    }

    /// Sets the post-precipitation lag in days.
    pub fn with_post_precipitation_lag(mut self, days: f64) -> Self {
        self.post_precipitation_lag = days;
        self
    }

    /// Sets the antecedent window in days.
    pub fn with_antecedent_period(mut self, days: f64) -> Self {
        self.antecedent_period = days;
        self
    }

    /// Returns the minimum segment span in days.
    pub fn min_recession_length(&self) -> f64 {
        self.min_recession_length
    }

    /// Returns the fluctuation tolerance in feet.
    pub fn fluctuation_tolerance(&self) -> f64 {
        self.fluctuation_tolerance
    }

    /// Returns the precipitation event threshold in inches.
    pub fn precipitation_tolerance(&self) -> f64 {
        self.precipitation_tolerance
    }

    /// Returns the post-precipitation lag in days.
    pub fn post_precipitation_lag(&self) -> f64 {
        self.post_precipitation_lag
    }

    /// Returns the antecedent window in days.
    pub fn antecedent_period(&self) -> f64 {
        self.antecedent_period
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: non-positive minimum length,
    /// negative tolerances or lag, or non-positive antecedent period.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if !self.min_recession_length.is_finite() || self.min_recession_length <= 0.0 {
            return Err(SegmentError::InvalidMinLength {
                value: self.min_recession_length,
            });
        }
        if !self.fluctuation_tolerance.is_finite() || self.fluctuation_tolerance < 0.0 {
            return Err(SegmentError::InvalidTolerance {
                field: "fluctuation_tolerance",
                value: self.fluctuation_tolerance,
            });
        }
        if !self.precipitation_tolerance.is_finite() || self.precipitation_tolerance < 0.0 {
            return Err(SegmentError::InvalidTolerance {
                field: "precipitation_tolerance",
                value: self.precipitation_tolerance,
            });
        }
        if !self.post_precipitation_lag.is_finite() || self.post_precipitation_lag < 0.0 {
            return Err(SegmentError::InvalidTolerance {
                field: "post_precipitation_lag",
                value: self.post_precipitation_lag,
            });
        }
        if !self.antecedent_period.is_finite() || self.antecedent_period <= 0.0 {
            return Err(SegmentError::InvalidAntecedentPeriod {
                value: self.antecedent_period,
            });
        }
        Ok(())
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::new()
    }
}
