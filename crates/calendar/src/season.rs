//! Meteorological season classification.

use serde::Serialize;

use crate::error::CalendarError;

/// Meteorological season of the northern hemisphere.
///
/// Used to partition recession segments for seasonal (multi-segment) curve
/// fitting and to key seasonal summaries. Ordering follows the water-year
/// convention of listing winter first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// December, January, February.
    Winter,
    /// March, April, May.
    Spring,
    /// June, July, August.
    Summer,
    /// September, October, November.
    Autumn,
}

impl Season {
    /// Classifies a 1-indexed calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn from_month(month: u8) -> Result<Self, CalendarError> {
        match month {
            12 | 1 | 2 => Ok(Season::Winter),
            3..=5 => Ok(Season::Spring),
            6..=8 => Ok(Season::Summer),
            9..=11 => Ok(Season::Autumn),
            _ => Err(CalendarError::InvalidMonth { month }),
        }
    }

    /// Returns all four seasons in declaration order.
    pub fn all() -> [Season; 4] {
        [Season::Winter, Season::Spring, Season::Summer, Season::Autumn]
    }

    /// Representative mid-month of the season (Jan, Apr, Jul, Oct).
    fn mid_month(self) -> u8 {
        match self {
            Season::Winter => 1,
            Season::Spring => 4,
            Season::Summer => 7,
            Season::Autumn => 10,
        }
    }

    /// Circular month distance between the mid-months of two seasons.
    ///
    /// Adjacent seasons are 3 months apart, opposite seasons 6. Used to pick
    /// the nearest fitted seasonal curve when a season has no curve of its
    /// own.
    pub fn month_distance(self, other: Season) -> u8 {
        let a = self.mid_month() as i16;
        let b = other.mid_month() as i16;
        let diff = (a - b).unsigned_abs() as u8;
        diff.min(12 - diff)
    }

    /// Lowercase label matching the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_classification() {
        assert_eq!(Season::from_month(12).unwrap(), Season::Winter);
        assert_eq!(Season::from_month(1).unwrap(), Season::Winter);
        assert_eq!(Season::from_month(2).unwrap(), Season::Winter);
        assert_eq!(Season::from_month(3).unwrap(), Season::Spring);
        assert_eq!(Season::from_month(5).unwrap(), Season::Spring);
        assert_eq!(Season::from_month(6).unwrap(), Season::Summer);
        assert_eq!(Season::from_month(8).unwrap(), Season::Summer);
        assert_eq!(Season::from_month(9).unwrap(), Season::Autumn);
        assert_eq!(Season::from_month(11).unwrap(), Season::Autumn);
    }

    #[test]
    fn invalid_month() {
        assert_eq!(
            Season::from_month(0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            Season::from_month(13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn distance_is_symmetric_and_circular() {
        assert_eq!(Season::Winter.month_distance(Season::Winter), 0);
        assert_eq!(Season::Winter.month_distance(Season::Spring), 3);
        assert_eq!(Season::Spring.month_distance(Season::Winter), 3);
        assert_eq!(Season::Winter.month_distance(Season::Summer), 6);
        // Winter (Jan) to Autumn (Oct) wraps around the year end.
        assert_eq!(Season::Winter.month_distance(Season::Autumn), 3);
    }

    #[test]
    fn ordering_for_map_keys() {
        let mut seasons = vec![Season::Autumn, Season::Winter, Season::Summer, Season::Spring];
        seasons.sort();
        assert_eq!(seasons, Season::all());
    }

    #[test]
    fn labels() {
        assert_eq!(Season::Winter.label(), "winter");
        assert_eq!(Season::Autumn.label(), "autumn");
    }
}
