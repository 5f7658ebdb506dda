//! @ai:module:intent Descriptive statistics for a single series
//! @ai:module:layer domain
//! @ai:module:public_api SeriesSummary
//! @ai:module:stateless true

use crate::series::TimeSeriesPoint;
use serde::Serialize;

/// @ai:intent Aggregate figures of one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub first_period: i32,
    pub last_period: i32,
    pub points: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub total: f64,
    pub latest: f64,
    /// Compound growth per period in percent, absent for one point or a zero start.
    pub growth_rate: Option<f64>,
}

impl SeriesSummary {
    /// @ai:intent Summarize a series, None when it is empty
    /// @ai:pre series periods are strictly ascending
    /// @ai:effects pure
    pub fn from_series(series: &[TimeSeriesPoint]) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let (min, max, total) = series.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, total), point| {
                (min.min(point.value), max.max(point.value), total + point.value)
            },
        );

        Some(Self {
            first_period: first.period,
            last_period: last.period,
            points: series.len(),
            min,
            max,
            mean: total / series.len() as f64,
            total,
            latest: last.value,
            growth_rate: compound_growth(first, last),
        })
    }

    /// @ai:intent One-line text used where no chart image is available
    /// @ai:effects pure
    pub fn describe(&self, unit: &str) -> String {
        let growth = self
            .growth_rate
            .map(|rate| format!(", growth {:+.1}% per year", rate))
            .unwrap_or_default();

        format!(
            "{} values from {} to {}: min {:.2} {unit}, max {:.2} {unit}, mean {:.2} {unit}, latest {:.2} {unit}{}",
            self.points,
            self.first_period,
            self.last_period,
            self.min,
            self.max,
            self.mean,
            self.latest,
            growth,
        )
    }
}

fn compound_growth(first: &TimeSeriesPoint, last: &TimeSeriesPoint) -> Option<f64> {
    let periods = i64::from(last.period) - i64::from(first.period);
    if periods <= 0 || first.value <= 0.0 {
        return None;
    }
    Some(((last.value / first.value).powf(1.0 / periods as f64) - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[(i32, f64)]) -> Vec<TimeSeriesPoint> {
        values
            .iter()
            .map(|(period, value)| TimeSeriesPoint::new(*period, *value))
            .collect()
    }

    #[test]
    fn test_empty_series_has_no_summary() {
        assert!(SeriesSummary::from_series(&[]).is_none());
    }

    #[test]
    fn test_summary_statistics() {
        let summary =
            SeriesSummary::from_series(&series(&[(2024, 100.0), (2025, 50.0), (2026, 121.0)]))
                .unwrap();

        assert_eq!(summary.points, 3);
        assert_eq!(summary.min, 50.0);
        assert_eq!(summary.max, 121.0);
        assert_eq!(summary.total, 271.0);
        assert_eq!(summary.latest, 121.0);
        assert!((summary.mean - 90.333).abs() < 0.01);
        assert!((summary.growth_rate.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_absent_for_single_point_or_zero_start() {
        let single = SeriesSummary::from_series(&series(&[(2025, 10.0)])).unwrap();
        assert_eq!(single.growth_rate, None);

        let zero_start = SeriesSummary::from_series(&series(&[(2025, 0.0), (2026, 10.0)])).unwrap();
        assert_eq!(zero_start.growth_rate, None);
    }

    #[test]
    fn test_growth_over_the_full_year_range() {
        let summary =
            SeriesSummary::from_series(&series(&[(i32::MIN, 10.0), (i32::MAX, 20.0)])).unwrap();

        assert_eq!(summary.first_period, i32::MIN);
        assert_eq!(summary.last_period, i32::MAX);
        let rate = summary.growth_rate.unwrap();
        assert!(rate > 0.0 && rate < 1e-6);
    }

    #[test]
    fn test_describe_mentions_bounds_and_unit() {
        let summary = SeriesSummary::from_series(&series(&[(2025, 10.0), (2026, 11.0)])).unwrap();
        let text = summary.describe("GWh");

        assert!(text.starts_with("2 values from 2025 to 2026"));
        assert!(text.contains("latest 11.00 GWh"));
        assert!(text.contains("growth +10.0% per year"));
    }
}
