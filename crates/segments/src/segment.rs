//! The recession segment type.

use chrono::{Datelike, NaiveDateTime};
use naiad_calendar::{Season, days_between};

use crate::error::SegmentError;

/// A contiguous span of declining water levels.
///
/// Points are stored as `(t, level)` with `t` in fractional days offset so
/// that `t = 0` at the segment start, which is the coordinate system curve
/// fitting pools segments in. Immutable once built.
#[derive(Debug, Clone)]
pub struct RecessionSegment {
    start_ts: NaiveDateTime,
    end_ts: NaiveDateTime,
    points: Vec<(f64, f64)>,
    length_days: f64,
    season: Season,
}

impl RecessionSegment {
    /// Builds a segment from timestamped levels.
    ///
    /// The points must be ordered by timestamp. The segment's season is the
    /// season of its start date.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::TooFewPoints`] for fewer than 2 points.
    pub fn from_points(points: &[(NaiveDateTime, f64)]) -> Result<Self, SegmentError> {
        if points.len() < 2 {
            return Err(SegmentError::TooFewPoints { got: points.len() });
        }
        let start_ts = points[0].0;
        let end_ts = points[points.len() - 1].0;
        let season = Season::from_month(start_ts.month() as u8)?;
        let offset_points: Vec<(f64, f64)> = points
            .iter()
            .map(|&(ts, level)| (days_between(start_ts, ts), level))
            .collect();

        Ok(Self {
            start_ts,
            end_ts,
            length_days: days_between(start_ts, end_ts),
            points: offset_points,
            season,
        })
    }

    /// Timestamp of the first reading.
    pub fn start_ts(&self) -> NaiveDateTime {
        self.start_ts
    }

    /// Timestamp of the last reading.
    pub fn end_ts(&self) -> NaiveDateTime {
        self.end_ts
    }

    /// `(days since segment start, level)` pairs.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Number of readings in the segment.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Span from first to last reading, in fractional days.
    pub fn length_days(&self) -> f64 {
        self.length_days
    }

    /// Season of the segment start date.
    pub fn season(&self) -> Season {
        self.season
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn ts(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn offsets_start_at_zero() {
        let seg = RecessionSegment::from_points(&[
            (ts(7, 1), 10.0),
            (ts(7, 2), 9.9),
            (ts(7, 4), 9.7),
        ])
        .unwrap();
        assert_eq!(seg.n_points(), 3);
        assert_relative_eq!(seg.points()[0].0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(seg.points()[1].0, 1.0, epsilon = 1e-12);
        assert_relative_eq!(seg.points()[2].0, 3.0, epsilon = 1e-12);
        assert_relative_eq!(seg.length_days(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn season_from_start_date() {
        let seg =
            RecessionSegment::from_points(&[(ts(7, 1), 10.0), (ts(7, 2), 9.9)]).unwrap();
        assert_eq!(seg.season(), Season::Summer);
    }

    #[test]
    fn too_few_points_rejected() {
        assert_eq!(
            RecessionSegment::from_points(&[(ts(7, 1), 10.0)]).unwrap_err(),
            SegmentError::TooFewPoints { got: 1 }
        );
    }
}
