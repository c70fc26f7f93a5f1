//! Fractional-day arithmetic between timestamps.

use chrono::NaiveDateTime;

/// Signed number of days from `start` to `end`, with fractional part.
///
/// Sub-second precision is truncated; hydrological records are at best
/// minute-resolution.
pub fn days_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 86_400.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn whole_days() {
        assert_relative_eq!(
            days_between(ts(2000, 1, 1, 0), ts(2000, 1, 11, 0)),
            10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn fractional_days() {
        assert_relative_eq!(
            days_between(ts(2000, 1, 1, 0), ts(2000, 1, 1, 6)),
            0.25,
            epsilon = 1e-12
        );
    }

    #[test]
    fn negative_when_reversed() {
        assert_relative_eq!(
            days_between(ts(2000, 1, 2, 0), ts(2000, 1, 1, 0)),
            -1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_for_same_instant() {
        let t = ts(2000, 5, 5, 12);
        assert_eq!(days_between(t, t), 0.0);
    }
}
