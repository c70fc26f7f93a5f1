//! # naiad-curve
//!
//! Master recession curve fitting.
//!
//! ## Fitting Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["recession segments"] -->|"pool (t, level)"| B["transformed regression"]
//!     B -->|"fit_master_curve()"| C["MasterCurve"]
//!     A -->|"partition by season"| D["fit_seasonal()"]
//!     D --> E["SeasonalCurves"]
//!     C -->|".evaluate(t)"| F["predicted level"]
//!     E -->|".evaluate(season, t)"| F
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use naiad_curve::{CurveType, FitConfig, fit_master_curve};
//!
//! let config = FitConfig::new();
//! let curve = fit_master_curve(&segments, CurveType::Exponential, &config)?;
//! let predicted = curve.evaluate(12.5);
//! ```

mod config;
mod curve_type;
mod error;
mod fit;
mod master;
mod poly;
mod seasonal;

pub use config::FitConfig;
pub use curve_type::CurveType;
pub use error::FitError;
pub use fit::{MIN_SEGMENTS, fit_master_curve, fit_pooled};
pub use master::{MasterCurve, POWER_EPS, evaluate_params};
pub use seasonal::{SeasonalCurves, fit_seasonal};
