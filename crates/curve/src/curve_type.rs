//! The curve model taxonomy.

use serde::Serialize;

/// Functional form of a master recession curve.
///
/// Each variant is a pure `fit`/`evaluate` pair; there is no inheritance or
/// dynamic dispatch involved. `MultiSegment` is the odd one out: it does not
/// fit a single pooled curve but one inner curve per season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// `level = L0 * exp(-a * t)`, fitted by regressing `ln(level)` on `t`.
    Exponential,
    /// `level = L0 * (t + eps)^(-b)`, fitted by regressing `ln(level)` on
    /// `ln(t + eps)`.
    Power,
    /// Least squares of `ln(level)` on `t`; parameters are the log-space
    /// `[intercept, slope]`.
    Linear,
    /// Raw-space polynomial of degree 2..=4; parameters are the coefficients
    /// in ascending order.
    Polynomial,
    /// One inner curve per season of the segment start dates.
    MultiSegment,
}

impl CurveType {
    /// Lowercase label matching the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            CurveType::Exponential => "exponential",
            CurveType::Power => "power",
            CurveType::Linear => "linear",
            CurveType::Polynomial => "polynomial",
            CurveType::MultiSegment => "multi_segment",
        }
    }
}
