//! # naiad-engine
//!
//! Groundwater recharge estimation from water-level time series.
//!
//! One call to [`calculate`] runs the whole pipeline: preprocessing,
//! segment identification, curve fitting, (ERC) cross-validation, event
//! detection, aggregation, and result assembly. The engine is a pure
//! function of `(readings, parameters)`; it keeps no state between runs and
//! performs no I/O.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["readings"] -->|"preprocess"| B["TimeSeries"]
//!     B -->|"identify_segments"| C["RecessionSegments"]
//!     C -->|"fit"| D["MasterCurve(s)"]
//!     C -->|"ERC: cross_validate"| E["CrossValidationResult"]
//!     D --> F["event detection"]
//!     E --> F
//!     F -->|"aggregate + assemble"| G["CalculationResult"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use naiad_engine::{Method, Parameters, calculate};
//!
//! let params = Parameters::new(Method::Mrc)
//!     .with_specific_yield(0.2)
//!     .with_threshold(0.1);
//! let result = calculate(&readings, &params)?;
//! println!("{}", naiad_engine::to_json(&result)?);
//! ```

mod aggregate;
mod error;
mod events;
mod params;
mod quality;
mod result;

use naiad_curve::{CurveType, fit_master_curve, fit_seasonal};
use naiad_segments::{antecedent_baselines, identify_segments};
use naiad_timeseries::{Reading, TimeSeries, preprocess};
use naiad_validate::{CrossValidationResult, cross_validate};
use tracing::debug;

use crate::events::FittedCurves;

pub use error::EngineError;
pub use params::{Method, Parameters};
pub use quality::{OverallWeights, QualityWeights};
pub use result::{
    CalculationResult, RechargeEvent, SeasonalSummary, SeasonalVariability, YearlySummary,
    to_json,
};

/// Runs one recharge calculation.
///
/// # Errors
///
/// Returns [`EngineError::EmptySeries`] for an empty input,
/// [`EngineError::InvalidParameter`] (or a wrapped stage validation error)
/// for an out-of-range parameter set,
/// [`EngineError::InsufficientSegments`] when MRC/ERC finds fewer than 3
/// recession segments, or a wrapped fit/validation error. No partial result
/// is produced on error; non-fatal quality issues are embedded in the
/// successful result instead.
#[tracing::instrument(skip_all, fields(method = params.method().label(), n_readings = readings.len()))]
pub fn calculate(
    readings: &[Reading],
    params: &Parameters,
) -> Result<CalculationResult, EngineError> {
    // Step 1: validate the full parameter set up front.
    params.validate()?;

    // Step 2: preprocess into a labelled series.
    let series = preprocess(readings, &params.preprocess_config())?;

    match params.method() {
        Method::Rise => run_rise(&series, params),
        Method::Mrc => run_master_curve(&series, params, false),
        Method::Erc => run_master_curve(&series, params, true),
    }
}

/// RISE: antecedent baselines, rise events, yearly summaries.
fn run_rise(series: &TimeSeries, params: &Parameters) -> Result<CalculationResult, EngineError> {
    let mut warnings = Vec::new();
    if series.span_days() < params.min_recession_length() {
        warnings.push(
            "series is shorter than the minimum recession length; low-confidence result"
                .to_string(),
        );
    }

    let baselines = antecedent_baselines(series, &params.segment_config())?;
    let events = events::detect_rise(series, &baselines, params);
    if events.is_empty() {
        warnings.push("no recharge events detected".to_string());
    }
    let yearly = aggregate::yearly_summaries(&events);

    Ok(CalculationResult::new(
        params.method(),
        params.clone(),
        Vec::new(),
        None,
        events,
        yearly,
        Vec::new(),
        None,
        None,
        warnings,
    ))
}

/// MRC/ERC: segments, curve fit, (ERC) cross-validation and quality
/// scoring, deviation events, aggregation.
fn run_master_curve(
    series: &TimeSeries,
    params: &Parameters,
    erc: bool,
) -> Result<CalculationResult, EngineError> {
    let mut warnings = Vec::new();

    // Step 3: recession segments.
    let segments = identify_segments(series, &params.segment_config())?;
    debug!(n_segments = segments.len(), "segments identified");

    // Step 4: master curve fit. Multi-segment fits one curve per season;
    // its cross-validation and fold scoring run against the pooled inner
    // curve type.
    let fit_config = params.fit_config();
    let (fitted, cv_curve_type, pooled_full_r2) = match params.curve_type() {
        CurveType::MultiSegment => {
            let seasonal = fit_seasonal(&segments, &fit_config)?;
            for season in seasonal.skipped_seasons() {
                warnings.push(format!(
                    "season {} had too few segments for its own curve",
                    season.label()
                ));
            }
            let pooled =
                fit_master_curve(&segments, params.seasonal_inner(), &fit_config)?;
            let pooled_r2 = pooled.r_squared();
            (FittedCurves::Seasonal(seasonal), params.seasonal_inner(), pooled_r2)
        }
        curve_type => {
            let curve = fit_master_curve(&segments, curve_type, &fit_config)?;
            let r2 = curve.r_squared();
            (FittedCurves::Single(curve), curve_type, r2)
        }
    };

    // Step 5: cross-validation (ERC only).
    let cv: Option<CrossValidationResult> = if erc {
        let cv = cross_validate(
            &segments,
            cv_curve_type,
            pooled_full_r2,
            &fit_config,
            params.cross_validation(),
        )?;
        if cv.degraded() {
            warnings.push(format!(
                "cross-validation R² ({:.3}) is well below the full-data fit ({:.3})",
                cv.mean_r_squared(),
                pooled_full_r2
            ));
        }
        if cv.n_failed_folds() > 0 {
            warnings.push(format!("{} fold refit(s) failed", cv.n_failed_folds()));
        }
        Some(cv)
    } else {
        None
    };

    // Step 6: deviation events, with quality scores when cross-validation
    // context exists.
    let events = events::detect_deviation(
        series,
        &segments,
        &fitted,
        cv.as_ref().map(|c| (c, cv_curve_type)),
        params,
    );
    if events.is_empty() {
        warnings.push("no recharge events detected".to_string());
    }

    // Step 7: aggregation.
    let yearly = aggregate::yearly_summaries(&events);
    let seasonal_summaries = if erc {
        aggregate::seasonal_summaries(&events)
    } else {
        Vec::new()
    };
    let seasonal_variability = match (&fitted, erc) {
        (FittedCurves::Seasonal(curves), true) => aggregate::seasonal_variability(curves),
        _ => None,
    };

    // Step 8: overall quality and assembly.
    let overall_quality = if erc {
        let event_scores: Vec<f64> = events.iter().filter_map(|e| e.quality_score).collect();
        let mean_event_quality = if event_scores.is_empty() {
            None
        } else {
            Some(naiad_stats::mean(&event_scores))
        };
        Some(quality::overall_quality(
            params.overall_weights(),
            fitted.mean_r_squared(),
            cv.as_ref().map(|c| c.mean_r_squared()).unwrap_or(0.0),
            mean_event_quality,
        ))
    } else {
        Some(fitted.mean_r_squared().clamp(0.0, 1.0))
    };

    Ok(CalculationResult::new(
        params.method(),
        params.clone(),
        fitted.to_curve_vec(),
        cv,
        events,
        yearly,
        seasonal_summaries,
        seasonal_variability,
        overall_quality,
        warnings,
    ))
}
