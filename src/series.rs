//! @ai:module:intent Canonical time-series types shared by fetchers, stores and reports
//! @ai:module:layer domain
//! @ai:module:public_api TimeSeriesPoint, PeriodRange, MAX_RANGE_PERIODS, is_strictly_ascending
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// @ai:intent One production figure for a single year
/// @ai:invariant value >= 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period: i32,
    pub value: f64,
}

impl TimeSeriesPoint {
    /// @ai:intent Create a point, clamping negative values to their magnitude
    /// @ai:effects pure
    pub fn new(period: i32, value: f64) -> Self {
        Self {
            period,
            value: value.abs(),
        }
    }
}

/// Widest range a store will fetch or simulate, in years.
pub const MAX_RANGE_PERIODS: usize = 500;

/// @ai:intent Inclusive range of years scoped by the caller
/// @ai:invariant start <= end, covers at most MAX_RANGE_PERIODS years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriodRange")]
pub struct PeriodRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
struct RawPeriodRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawPeriodRange> for PeriodRange {
    type Error = Error;

    fn try_from(raw: RawPeriodRange) -> Result<Self> {
        PeriodRange::new(raw.start, raw.end)
    }
}

impl PeriodRange {
    /// @ai:intent Create a validated period range
    /// @ai:pre start <= end and the span is at most MAX_RANGE_PERIODS years
    /// @ai:effects pure
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange {
                start,
                end,
                reason: "start is after end",
            });
        }
        if span(start, end) > MAX_RANGE_PERIODS as i64 {
            return Err(Error::InvalidRange {
                start,
                end,
                reason: "range covers more than 500 years",
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// @ai:intent Number of periods covered, both ends included
    /// @ai:effects pure
    pub fn period_count(&self) -> usize {
        span(self.start, self.end) as usize
    }

    /// @ai:intent Iterate the covered periods in ascending order
    /// @ai:effects pure
    pub fn periods(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    pub fn contains(&self, period: i32) -> bool {
        self.periods().contains(&period)
    }
}

impl std::fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

fn span(start: i32, end: i32) -> i64 {
    i64::from(end) - i64::from(start) + 1
}

/// @ai:intent Check that periods are unique and strictly ascending
/// @ai:effects pure
pub fn is_strictly_ascending(series: &[TimeSeriesPoint]) -> bool {
    series.windows(2).all(|pair| pair[0].period < pair[1].period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let err = PeriodRange::new(2030, 2025).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { start: 2030, end: 2025, .. }));
    }

    #[test]
    fn test_range_rejects_spans_wider_than_limit() {
        let err = PeriodRange::new(i32::MIN, i32::MAX).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRange {
                start: i32::MIN,
                end: i32::MAX,
                ..
            }
        ));

        assert!(PeriodRange::new(0, i32::MAX).is_err());
        assert!(PeriodRange::new(2000, 2000 + MAX_RANGE_PERIODS as i32).is_err());
    }

    #[test]
    fn test_widest_allowed_range() {
        let range = PeriodRange::new(2000, 2000 + MAX_RANGE_PERIODS as i32 - 1).unwrap();
        assert_eq!(range.period_count(), MAX_RANGE_PERIODS);
    }

    #[test]
    fn test_period_count_at_extreme_years() {
        let top = PeriodRange::new(i32::MAX - 2, i32::MAX).unwrap();
        assert_eq!(top.period_count(), 3);
        assert_eq!(top.periods().count(), 3);

        let bottom = PeriodRange::new(i32::MIN, i32::MIN).unwrap();
        assert_eq!(bottom.period_count(), 1);
    }

    #[test]
    fn test_single_year_range() {
        let range = PeriodRange::new(2025, 2025).unwrap();
        assert_eq!(range.period_count(), 1);
        assert_eq!(range.to_string(), "2025");
        assert_eq!(range.periods().collect::<Vec<_>>(), vec![2025]);
    }

    #[test]
    fn test_range_display_and_len() {
        let range = PeriodRange::new(2020, 2030).unwrap();
        assert_eq!(range.period_count(), 11);
        assert_eq!(range.to_string(), "2020-2030");
        assert!(range.contains(2024));
        assert!(!range.contains(2031));
    }

    #[test]
    fn test_deserialize_validates_bounds() {
        let ok: PeriodRange = serde_json::from_str(r#"{"start":2025,"end":2027}"#).unwrap();
        assert_eq!(ok.period_count(), 3);

        let inverted = serde_json::from_str::<PeriodRange>(r#"{"start":2027,"end":2025}"#);
        assert!(inverted.is_err());
    }

    #[test]
    fn test_point_takes_magnitude() {
        assert_eq!(TimeSeriesPoint::new(2025, -12.5).value, 12.5);
    }

    #[test]
    fn test_strictly_ascending_detects_duplicates() {
        let ok = [TimeSeriesPoint::new(2024, 1.0), TimeSeriesPoint::new(2025, 2.0)];
        let dup = [TimeSeriesPoint::new(2024, 1.0), TimeSeriesPoint::new(2024, 2.0)];
        assert!(is_strictly_ascending(&ok));
        assert!(!is_strictly_ascending(&dup));
        assert!(is_strictly_ascending(&[]));
    }
}
