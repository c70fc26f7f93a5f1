//! Cross-validation configuration.

use serde::Serialize;

use crate::error::ValidateError;

/// Fold partitioning method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CvMethod {
    /// Segments split into k roughly equal groups; each group validates
    /// once.
    #[default]
    KFold,
    /// Every segment is held out once.
    LeaveOneOut,
    /// Earliest 70% of segments (by start date) train, the latest 30%
    /// validate, as a single fold.
    TemporalSplit,
}

impl CvMethod {
    /// Lowercase label matching the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            CvMethod::KFold => "k_fold",
            CvMethod::LeaveOneOut => "leave_one_out",
            CvMethod::TemporalSplit => "temporal_split",
        }
    }
}

/// Configuration for a cross-validation run.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```ignore
/// use naiad_validate::{CvConfig, CvMethod};
///
/// let config = CvConfig::new()
///     .with_method(CvMethod::KFold)
///     .with_k(10);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CvConfig {
    /// Fold partitioning method.
    method: CvMethod,
    /// Number of folds for k-fold (clamped to the segment count).
    k: usize,
    /// Seed for the deterministic k-fold shuffle.
    seed: u64,
}

impl CvConfig {
    /// Creates a configuration with defaults: 5-fold, seed 42.
    pub fn new() -> Self {
        Self {
            method: CvMethod::KFold,
            k: 5,
            seed: 42,
        }
    }

    /// Sets the partitioning method.
    pub fn with_method(mut self, method: CvMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the number of k-fold groups.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the shuffle seed.
    ///
    /// The seed is what keeps the engine a pure function of its inputs:
    /// identical series and parameters always produce identical folds.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the partitioning method.
    pub fn method(&self) -> CvMethod {
        self.method
    }

    /// Returns the number of k-fold groups.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the shuffle seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidK`] if `k < 2`.
    pub fn validate(&self) -> Result<(), ValidateError> {
        if self.k < 2 {
            return Err(ValidateError::InvalidK { k: self.k });
        }
        Ok(())
    }
}

impl Default for CvConfig {
    fn default() -> Self {
        Self::new()
    }
}
