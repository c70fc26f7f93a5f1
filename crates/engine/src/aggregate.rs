//! Water-year and seasonal aggregation of events.

use std::collections::BTreeMap;

use naiad_calendar::Season;
use naiad_curve::SeasonalCurves;

use crate::result::{RechargeEvent, SeasonalSummary, SeasonalVariability, YearlySummary};

/// Groups events by water year.
///
/// Summaries are derived data: they are recomputed from the event set, never
/// updated independently.
pub(crate) fn yearly_summaries(events: &[RechargeEvent]) -> Vec<YearlySummary> {
    let mut by_year: BTreeMap<i32, Vec<&RechargeEvent>> = BTreeMap::new();
    for event in events {
        by_year.entry(event.water_year).or_default().push(event);
    }

    by_year
        .into_iter()
        .map(|(water_year, group)| {
            let deviations: Vec<f64> = group.iter().map(|e| e.deviation).collect();
            YearlySummary {
                water_year,
                total_recharge: group.iter().map(|e| e.recharge_inches).sum(),
                event_count: group.len(),
                max_deviation: deviations.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                avg_deviation: naiad_stats::mean(&deviations),
            }
        })
        .collect()
}

/// Groups events by season (ERC).
pub(crate) fn seasonal_summaries(events: &[RechargeEvent]) -> Vec<SeasonalSummary> {
    let mut by_season: BTreeMap<Season, Vec<&RechargeEvent>> = BTreeMap::new();
    for event in events {
        by_season.entry(event.season).or_default().push(event);
    }

    by_season
        .into_iter()
        .map(|(season, group)| {
            let deviations: Vec<f64> = group.iter().map(|e| e.deviation).collect();
            SeasonalSummary {
                season,
                total_recharge: group.iter().map(|e| e.recharge_inches).sum(),
                event_count: group.len(),
                max_deviation: deviations.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                avg_deviation: naiad_stats::mean(&deviations),
            }
        })
        .collect()
}

/// Coefficient of variation of each curve parameter across the seasonal
/// curves. `None` with fewer than two curves.
pub(crate) fn seasonal_variability(curves: &SeasonalCurves) -> Option<SeasonalVariability> {
    let season_count = curves.curves().len();
    if season_count < 2 {
        return None;
    }
    let n_params = curves
        .curves()
        .values()
        .map(|c| c.parameters().len())
        .min()?;

    let parameter_cv = (0..n_params)
        .map(|p| {
            let values: Vec<f64> = curves
                .curves()
                .values()
                .map(|c| c.parameters()[p])
                .collect();
            naiad_stats::coefficient_of_variation(&values)
        })
        .collect();

    Some(SeasonalVariability {
        parameter_cv,
        season_count,
    })
}
