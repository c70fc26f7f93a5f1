//! Curve fitting configuration.

use crate::curve_type::CurveType;
use crate::error::FitError;

/// Configuration for curve fitting.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```ignore
/// use naiad_curve::{CurveType, FitConfig};
///
/// let config = FitConfig::new()
///     .with_poly_degree(3)
///     .with_seasonal_inner(CurveType::Power);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Degree of the polynomial fit (2..=4).
    poly_degree: usize,
    /// Curve type fitted per season by multi_segment.
    seasonal_inner: CurveType,
    /// Minimum segments a season needs to receive its own curve.
    min_segments_per_season: usize,
}

impl FitConfig {
    /// Creates a configuration with defaults: degree-2 polynomial,
    /// exponential seasonal inner curves, 3 segments per season.
    pub fn new() -> Self {
        Self {
            poly_degree: 2,
            seasonal_inner: CurveType::Exponential,
            min_segments_per_season: 3,
        }
    }

    /// Sets the polynomial degree.
    pub fn with_poly_degree(mut self, degree: usize) -> Self {
        self.poly_degree = degree;
        self
    }

    /// Sets the seasonal inner curve type.
    pub fn with_seasonal_inner(mut self, curve_type: CurveType) -> Self {
        self.seasonal_inner = curve_type;
        self
    }

    /// Sets the per-season segment minimum.
    pub fn with_min_segments_per_season(mut self, min: usize) -> Self {
        self.min_segments_per_season = min;
        self
    }

    /// Returns the polynomial degree.
    pub fn poly_degree(&self) -> usize {
        self.poly_degree
    }

    /// Returns the seasonal inner curve type.
    pub fn seasonal_inner(&self) -> CurveType {
        self.seasonal_inner
    }

    /// Returns the per-season segment minimum.
    pub fn min_segments_per_season(&self) -> usize {
        self.min_segments_per_season
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidDegree`] for a degree outside 2..=4,
    /// [`FitError::InvalidInnerCurveType`] if multi_segment is its own inner
    /// type, or [`FitError::InvalidSeasonMinimum`] for a minimum below 2.
    pub fn validate(&self) -> Result<(), FitError> {
        if !(2..=4).contains(&self.poly_degree) {
            return Err(FitError::InvalidDegree {
                degree: self.poly_degree,
            });
        }
        if self.seasonal_inner == CurveType::MultiSegment {
            return Err(FitError::InvalidInnerCurveType);
        }
        if self.min_segments_per_season < 2 {
            return Err(FitError::InvalidSeasonMinimum {
                value: self.min_segments_per_season,
            });
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}
