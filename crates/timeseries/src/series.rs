//! Validated, column-oriented time series storage.

use chrono::{Datelike, NaiveDateTime};
use naiad_calendar::{days_between, water_year};

use crate::error::SeriesError;
use crate::reading::Reading;

/// Owned, validated water-level time series.
///
/// Built once from readings and immutable afterwards. Stores columns rather
/// than rows so the scanning stages can iterate levels and timestamps without
/// per-reading indirection. Every reading carries its water-year label,
/// computed at construction from the configured water-year start date.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDateTime>,
    levels: Vec<f64>,
    /// Present iff at least one input reading carried a precipitation value;
    /// readings without one contribute 0.0.
    precipitation: Option<Vec<f64>>,
    water_years: Vec<i32>,
}

impl TimeSeries {
    /// Builds a series from readings, validating the §6 input contract.
    ///
    /// Readings must be non-empty, strictly ordered by timestamp, and carry
    /// finite levels; precipitation values, where present, must be finite and
    /// non-negative. Water-year labels are computed from
    /// `(start_month, start_day)`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Empty`], [`SeriesError::UnsortedTimestamps`],
    /// [`SeriesError::DuplicateTimestamp`], [`SeriesError::NonFiniteLevel`],
    /// [`SeriesError::InvalidPrecipitation`], or a calendar error for an
    /// invalid water-year start date.
    pub fn from_readings(
        readings: &[Reading],
        start_month: u8,
        start_day: u8,
    ) -> Result<Self, SeriesError> {
        if readings.is_empty() {
            return Err(SeriesError::Empty);
        }

        let n = readings.len();
        let mut timestamps = Vec::with_capacity(n);
        let mut levels = Vec::with_capacity(n);
        let mut water_years = Vec::with_capacity(n);
        let has_precip = readings.iter().any(|r| r.precipitation.is_some());
        let mut precipitation = if has_precip {
            Some(Vec::with_capacity(n))
        } else {
            None
        };

        for (i, r) in readings.iter().enumerate() {
            if i > 0 {
                let prev = timestamps[i - 1];
                if r.timestamp == prev {
                    return Err(SeriesError::DuplicateTimestamp { index: i });
                }
                if r.timestamp < prev {
                    return Err(SeriesError::UnsortedTimestamps { index: i });
                }
            }
            if !r.water_level.is_finite() {
                return Err(SeriesError::NonFiniteLevel { index: i });
            }
            if let Some(p) = r.precipitation
                && (!p.is_finite() || p < 0.0)
            {
                return Err(SeriesError::InvalidPrecipitation { index: i, value: p });
            }

            timestamps.push(r.timestamp);
            levels.push(r.water_level);
            water_years.push(water_year(r.timestamp.date(), start_month, start_day)?);
            if let Some(col) = precipitation.as_mut() {
                col.push(r.precipitation.unwrap_or(0.0));
            }
        }

        Ok(Self {
            timestamps,
            levels,
            precipitation,
            water_years,
        })
    }

    /// Number of readings. Always >= 1.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false; an empty series cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Returns the observation timestamps.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Returns the water levels (feet).
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Returns the precipitation column (inches), if any reading carried one.
    pub fn precipitation(&self) -> Option<&[f64]> {
        self.precipitation.as_deref()
    }

    /// Returns the water-year label per reading.
    pub fn water_years(&self) -> &[i32] {
        &self.water_years
    }

    /// Reconstructs the row view of reading `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn reading(&self, i: usize) -> Reading {
        Reading {
            timestamp: self.timestamps[i],
            water_level: self.levels[i],
            precipitation: self.precipitation.as_ref().map(|p| p[i]),
        }
    }

    /// 1-indexed calendar month of reading `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn month(&self, i: usize) -> u8 {
        self.timestamps[i].month() as u8
    }

    /// Span from first to last reading, in fractional days.
    pub fn span_days(&self) -> f64 {
        days_between(self.timestamps[0], self.timestamps[self.len() - 1])
    }
}
