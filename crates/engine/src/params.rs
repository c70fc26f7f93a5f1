//! The engine parameter set.

use naiad_curve::{CurveType, FitConfig};
use naiad_segments::SegmentConfig;
use naiad_timeseries::{AggregateMethod, DownsampleRule, PreprocessConfig};
use naiad_validate::CvConfig;
use serde::Serialize;

use crate::error::EngineError;
use crate::quality::{OverallWeights, QualityWeights};

/// Recharge estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Rise-above-recession: per-reading antecedent baselines, no master
    /// curve.
    Rise,
    /// Master recession curve: pooled curve fit, deviation events.
    Mrc,
    /// Extended recession curve: MRC plus cross-validation, per-event
    /// quality scores, and seasonal analysis.
    Erc,
}

impl Method {
    /// Lowercase label matching the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Method::Rise => "rise",
            Method::Mrc => "mrc",
            Method::Erc => "erc",
        }
    }
}

/// Full parameter set of a calculation run.
///
/// One value of this type, together with the input readings, determines a
/// run completely; the engine keeps no other state.
/// [`Parameters::validate`] checks the whole set and is called by the
/// pipeline before any work happens.
///
/// # Example
///
/// ```ignore
/// use naiad_engine::{Method, Parameters};
///
/// let params = Parameters::new(Method::Mrc)
///     .with_specific_yield(0.15)
///     .with_threshold(0.2);
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Parameters {
    method: Method,
    /// Fraction of aquifer volume that drains under gravity, in (0, 1].
    specific_yield: f64,
    /// Event threshold in feet: rise threshold for RISE, deviation
    /// threshold for MRC/ERC.
    threshold: f64,
    min_recession_length: f64,
    fluctuation_tolerance: f64,
    precipitation_tolerance: f64,
    post_precipitation_lag: f64,
    antecedent_period: f64,
    curve_type: CurveType,
    poly_degree: usize,
    /// Inner curve type fitted per season by multi_segment.
    seasonal_inner: CurveType,
    cross_validation: CvConfig,
    water_year_start_month: u8,
    water_year_start_day: u8,
    downsample: DownsampleRule,
    downsample_method: AggregateMethod,
    smoothing_window: Option<usize>,
    quality_weights: QualityWeights,
    overall_weights: OverallWeights,
}

impl Parameters {
    /// Creates a parameter set for the given method with defaults
    /// throughout: specific yield 0.2, threshold 0.1 ft, 10-day minimum
    /// recession, exponential curve, 5-fold cross-validation, October 1
    /// water-year start, no downsampling or smoothing.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            specific_yield: 0.2,
            threshold: 0.1,
            min_recession_length: 10.0,
            fluctuation_tolerance: 0.02,
            precipitation_tolerance: 0.05,
            post_precipitation_lag: 2.0,
            antecedent_period: 7.0,
            curve_type: CurveType::Exponential,
            poly_degree: 2,
            seasonal_inner: CurveType::Exponential,
            cross_validation: CvConfig::new(),
            water_year_start_month: 10,
            water_year_start_day: 1,
            downsample: DownsampleRule::None,
            downsample_method: AggregateMethod::Mean,
            smoothing_window: None,
            quality_weights: QualityWeights::new(),
            overall_weights: OverallWeights::new(),
        }
    }

    /// Sets the specific yield.
    pub fn with_specific_yield(mut self, sy: f64) -> Self {
        self.specific_yield = sy;
        self
    }

    /// Sets the event threshold (feet).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the minimum recession length (days).
    pub fn with_min_recession_length(mut self, days: f64) -> Self {
        self.min_recession_length = days;
        self
    }

    /// Sets the fluctuation tolerance (feet).
    pub fn with_fluctuation_tolerance(mut self, tol: f64) -> Self {
        self.fluctuation_tolerance = tol;
        self
    }

    /// Sets the precipitation event threshold (inches).
    pub fn with_precipitation_tolerance(mut self, tol: f64) -> Self {
        self.precipitation_tolerance = tol;
        self
    }

    /// Sets the post-precipitation lag (days).
    pub fn with_post_precipitation_lag(mut self, days: f64) -> Self {
        self.post_precipitation_lag = days;
        self
    }

    /// Sets the antecedent window (days).
    pub fn with_antecedent_period(mut self, days: f64) -> Self {
        self.antecedent_period = days;
        self
    }

    /// Sets the master curve type.
    pub fn with_curve_type(mut self, curve_type: CurveType) -> Self {
        self.curve_type = curve_type;
        self
    }

    /// Sets the polynomial degree (2..=4).
    pub fn with_poly_degree(mut self, degree: usize) -> Self {
        self.poly_degree = degree;
        self
    }

    /// Sets the seasonal inner curve type.
    pub fn with_seasonal_inner(mut self, curve_type: CurveType) -> Self {
        self.seasonal_inner = curve_type;
        self
    }

    /// Sets the cross-validation configuration (ERC).
    pub fn with_cross_validation(mut self, config: CvConfig) -> Self {
        self.cross_validation = config;
        self
    }

    /// Sets the water-year start date.
    pub fn with_water_year_start(mut self, month: u8, day: u8) -> Self {
        self.water_year_start_month = month;
        self.water_year_start_day = day;
        self
    }

    /// Sets the downsampling rule.
    pub fn with_downsample(mut self, rule: DownsampleRule) -> Self {
        self.downsample = rule;
        self
    }

    /// Sets the downsampling aggregation method.
    pub fn with_downsample_method(mut self, method: AggregateMethod) -> Self {
        self.downsample_method = method;
        self
    }

    /// Sets or clears the smoothing window.
    pub fn with_smoothing_window(mut self, window: Option<usize>) -> Self {
        self.smoothing_window = window;
        self
    }

    /// Sets the per-event quality weights (ERC).
    pub fn with_quality_weights(mut self, weights: QualityWeights) -> Self {
        self.quality_weights = weights;
        self
    }

    /// Sets the overall quality weights (ERC).
    pub fn with_overall_weights(mut self, weights: OverallWeights) -> Self {
        self.overall_weights = weights;
        self
    }

    /// Returns the method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the specific yield.
    pub fn specific_yield(&self) -> f64 {
        self.specific_yield
    }

    /// Returns the event threshold (feet).
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the minimum recession length (days).
    pub fn min_recession_length(&self) -> f64 {
        self.min_recession_length
    }

    /// Returns the master curve type.
    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Returns the seasonal inner curve type.
    pub fn seasonal_inner(&self) -> CurveType {
        self.seasonal_inner
    }

    /// Returns the cross-validation configuration.
    pub fn cross_validation(&self) -> &CvConfig {
        &self.cross_validation
    }

    /// Returns the per-event quality weights.
    pub fn quality_weights(&self) -> &QualityWeights {
        &self.quality_weights
    }

    /// Returns the overall quality weights.
    pub fn overall_weights(&self) -> &OverallWeights {
        &self.overall_weights
    }

    /// The preprocessing view of this parameter set.
    pub fn preprocess_config(&self) -> PreprocessConfig {
        PreprocessConfig::new()
            .with_downsample(self.downsample)
            .with_method(self.downsample_method)
            .with_smoothing_window(self.smoothing_window)
            .with_water_year_start(self.water_year_start_month, self.water_year_start_day)
    }

    /// The segment identification view of this parameter set.
    pub fn segment_config(&self) -> SegmentConfig {
        SegmentConfig::new()
            .with_min_recession_length(self.min_recession_length)
            .with_fluctuation_tolerance(self.fluctuation_tolerance)
            .with_precipitation_tolerance(self.precipitation_tolerance)
            .with_post_precipitation_lag(self.post_precipitation_lag)
            .with_antecedent_period(self.antecedent_period)
    }

    /// The curve fitting view of this parameter set.
    pub fn fit_config(&self) -> FitConfig {
        FitConfig::new()
            .with_poly_degree(self.poly_degree)
            .with_seasonal_inner(self.seasonal_inner)
    }

    /// Validates the whole parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for an out-of-range scalar,
    /// or the wrapped error of whichever stage configuration fails its own
    /// validation.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.specific_yield.is_finite()
            || self.specific_yield <= 0.0
            || self.specific_yield > 1.0
        {
            return Err(EngineError::InvalidParameter {
                name: "specific_yield",
                value: self.specific_yield,
                constraint: "must be in (0, 1]",
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "threshold",
                value: self.threshold,
                constraint: "must be finite and non-negative",
            });
        }
        self.preprocess_config().validate()?;
        self.segment_config().validate()?;
        self.fit_config().validate()?;
        self.cross_validation.validate()?;
        self.quality_weights.validate()?;
        self.overall_weights.validate()?;
        Ok(())
    }
}
