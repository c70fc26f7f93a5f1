//! Input row type.

use chrono::NaiveDateTime;

/// A single observed water-level reading.
///
/// The construction input of the pipeline: upstream collaborators hand the
/// engine an ordered, deduplicated slice of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Observation timestamp.
    pub timestamp: NaiveDateTime,
    /// Water level in feet.
    pub water_level: f64,
    /// Precipitation total since the previous reading, in inches, if a
    /// co-located gauge record exists.
    pub precipitation: Option<f64>,
}

impl Reading {
    /// Creates a reading without precipitation.
    pub fn new(timestamp: NaiveDateTime, water_level: f64) -> Self {
        Self {
            timestamp,
            water_level,
            precipitation: None,
        }
    }

    /// Creates a reading with a precipitation value.
    pub fn with_precipitation(timestamp: NaiveDateTime, water_level: f64, precip: f64) -> Self {
        Self {
            timestamp,
            water_level,
            precipitation: Some(precip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn constructors() {
        let r = Reading::new(ts(), 10.5);
        assert_eq!(r.water_level, 10.5);
        assert!(r.precipitation.is_none());

        let r = Reading::with_precipitation(ts(), 10.5, 0.3);
        assert_eq!(r.precipitation, Some(0.3));
    }
}
