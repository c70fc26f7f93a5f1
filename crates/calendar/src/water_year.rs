//! Water year computation.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Maximum valid day per month. February is capped at 28 so a start date is
/// valid in every calendar year.
const MAX_DAY: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Computes the water year for a calendar date.
///
/// A water year is defined by its `(start_month, start_day)`. All dates on or
/// after the start date belong to the *next* calendar year's water year, so
/// with the standard October 1 start, Oct 1 of year Y through Sep 30 of year
/// Y+1 belong to water year Y+1. A January 1 start makes the water year equal
/// to the calendar year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `start_month` is outside 1..=12,
/// or [`CalendarError::InvalidDay`] if `start_day` is invalid for
/// `start_month`.
///
/// # Examples
///
/// ```ignore
/// let oct1 = NaiveDate::from_ymd_opt(2000, 10, 1).unwrap();
/// assert_eq!(water_year(oct1, 10, 1).unwrap(), 2001); // Oct 1 2000 -> WY 2001
///
/// let sep30 = NaiveDate::from_ymd_opt(2001, 9, 30).unwrap();
/// assert_eq!(water_year(sep30, 10, 1).unwrap(), 2001); // Sep 30 2001 -> WY 2001
/// ```
pub fn water_year(date: NaiveDate, start_month: u8, start_day: u8) -> Result<i32, CalendarError> {
    if !(1..=12).contains(&start_month) {
        return Err(CalendarError::InvalidMonth { month: start_month });
    }
    let max_day = MAX_DAY[(start_month - 1) as usize];
    if start_day < 1 || start_day > max_day {
        return Err(CalendarError::InvalidDay {
            day: start_day,
            month: start_month,
            max_day,
        });
    }

    if start_month == 1 && start_day == 1 {
        return Ok(date.year());
    }

    let month = date.month() as u8;
    let day = date.day() as u8;
    if (month, day) >= (start_month, start_day) {
        Ok(date.year() + 1)
    } else {
        Ok(date.year())
    }
}
