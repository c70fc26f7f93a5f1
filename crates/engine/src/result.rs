//! Output record types for a calculation run.

use chrono::NaiveDateTime;
use naiad_calendar::Season;
use naiad_curve::MasterCurve;
use naiad_validate::CrossValidationResult;
use serde::Serialize;

use crate::error::EngineError;
use crate::params::{Method, Parameters};

/// A single detected recharge event.
#[derive(Debug, Clone, Serialize)]
pub struct RechargeEvent {
    /// Timestamp of the reading that triggered the event.
    pub event_date: NaiveDateTime,
    /// Water year of the event.
    pub water_year: i32,
    /// Season of the event.
    pub season: Season,
    /// Observed water level (feet).
    pub observed_level: f64,
    /// Master-curve prediction (MRC/ERC) or antecedent baseline (RISE),
    /// in feet.
    pub reference_level: f64,
    /// Observed minus reference (feet). Always above the configured
    /// threshold.
    pub deviation: f64,
    /// `deviation * specific_yield * 12`.
    pub recharge_inches: f64,
    /// Per-event quality in [0, 1]; ERC only.
    pub quality_score: Option<f64>,
}

/// Per-water-year aggregation of events.
#[derive(Debug, Clone, Serialize)]
pub struct YearlySummary {
    /// The water year.
    pub water_year: i32,
    /// Sum of `recharge_inches` over the year's events.
    pub total_recharge: f64,
    /// Number of events.
    pub event_count: usize,
    /// Largest single deviation (feet).
    pub max_deviation: f64,
    /// Mean deviation (feet).
    pub avg_deviation: f64,
}

/// Per-season aggregation of events (ERC).
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalSummary {
    /// The season.
    pub season: Season,
    /// Sum of `recharge_inches` over the season's events.
    pub total_recharge: f64,
    /// Number of events.
    pub event_count: usize,
    /// Largest single deviation (feet).
    pub max_deviation: f64,
    /// Mean deviation (feet).
    pub avg_deviation: f64,
}

/// Spread of recession parameters across seasonal curves (ERC,
/// multi-segment fits only).
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalVariability {
    /// Coefficient of variation per curve parameter position; `None` where
    /// the mean is zero.
    pub parameter_cv: Vec<Option<f64>>,
    /// Number of seasonal curves compared.
    pub season_count: usize,
}

/// The immutable result record of one calculation run.
///
/// Read-only after assembly; contains everything needed to reconstruct
/// every event, summary, and curve without re-running the engine.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    method: Method,
    parameters: Parameters,
    curves: Vec<MasterCurve>,
    cross_validation: Option<CrossValidationResult>,
    events: Vec<RechargeEvent>,
    yearly_summaries: Vec<YearlySummary>,
    seasonal_summaries: Vec<SeasonalSummary>,
    seasonal_variability: Option<SeasonalVariability>,
    overall_quality: Option<f64>,
    warnings: Vec<String>,
}

impl CalculationResult {
    /// Creates a result (crate-internal constructor).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        method: Method,
        parameters: Parameters,
        curves: Vec<MasterCurve>,
        cross_validation: Option<CrossValidationResult>,
        events: Vec<RechargeEvent>,
        yearly_summaries: Vec<YearlySummary>,
        seasonal_summaries: Vec<SeasonalSummary>,
        seasonal_variability: Option<SeasonalVariability>,
        overall_quality: Option<f64>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            method,
            parameters,
            curves,
            cross_validation,
            events,
            yearly_summaries,
            seasonal_summaries,
            seasonal_variability,
            overall_quality,
            warnings,
        }
    }

    /// Returns the method that produced this result.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the parameter set the run used.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the fitted master curves: empty for RISE, one for pooled
    /// fits, one per season for multi-segment fits.
    pub fn curves(&self) -> &[MasterCurve] {
        &self.curves
    }

    /// Returns the cross-validation result (ERC).
    pub fn cross_validation(&self) -> Option<&CrossValidationResult> {
        self.cross_validation.as_ref()
    }

    /// Returns the detected recharge events.
    pub fn events(&self) -> &[RechargeEvent] {
        &self.events
    }

    /// Returns the per-water-year summaries.
    pub fn yearly_summaries(&self) -> &[YearlySummary] {
        &self.yearly_summaries
    }

    /// Returns the per-season summaries (ERC; empty otherwise).
    pub fn seasonal_summaries(&self) -> &[SeasonalSummary] {
        &self.seasonal_summaries
    }

    /// Returns the seasonal parameter variability (ERC multi-segment).
    pub fn seasonal_variability(&self) -> Option<&SeasonalVariability> {
        self.seasonal_variability.as_ref()
    }

    /// Returns the overall calculation quality in [0, 1]: the weighted ERC
    /// combination, the clamped master R² for MRC, absent for RISE.
    pub fn overall_quality(&self) -> Option<f64> {
        self.overall_quality
    }

    /// Returns the non-fatal quality warnings collected during the run.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Serialize a result to a pretty JSON string.
///
/// # Errors
///
/// Returns [`EngineError::Serialization`] if JSON serialization fails.
pub fn to_json(result: &CalculationResult) -> Result<String, EngineError> {
    serde_json::to_string_pretty(result).map_err(|e| EngineError::Serialization {
        reason: e.to_string(),
    })
}
