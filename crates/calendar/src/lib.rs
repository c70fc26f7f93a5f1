//! # naiad-calendar
//!
//! Water-year and season arithmetic for irregular hydrological time series.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use naiad_calendar::{Season, days_between, water_year};
//!
//! // Water year with the standard October 1 start:
//! let d = NaiveDate::from_ymd_opt(2000, 10, 1).unwrap();
//! assert_eq!(water_year(d, 10, 1).unwrap(), 2001);
//!
//! // Season classification:
//! assert_eq!(Season::from_month(10).unwrap(), Season::Autumn);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `water_year` | Water year computation from a (month, day) start |
//! | `season` | Meteorological season classification |
//! | `duration` | Fractional-day arithmetic between timestamps |
//! | `error` | Error types |

mod duration;
mod error;
mod season;
mod water_year;

pub use duration::days_between;
pub use error::CalendarError;
pub use season::Season;
pub use water_year::water_year;
