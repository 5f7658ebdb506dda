//! @ai:module:intent Reproducible synthetic series used when live data is unavailable
//! @ai:module:layer domain
//! @ai:module:public_api DeterministicFallbackGenerator
//! @ai:module:stateless true

use crate::resource::{FallbackShape, ResourceTypeConfig};
use crate::series::{PeriodRange, TimeSeriesPoint};
use std::f64::consts::TAU;

/// @ai:intent Generates simulated series from a closed-form function of the period
/// @ai:effects pure
pub struct DeterministicFallbackGenerator;

impl DeterministicFallbackGenerator {
    /// @ai:intent Produce one point per period of the range
    /// @ai:post result periods equal range.periods(), every value >= 0
    /// @ai:effects pure
    pub fn generate(config: &ResourceTypeConfig, range: PeriodRange) -> Vec<TimeSeriesPoint> {
        let mut series = Vec::with_capacity(range.period_count());
        series.extend(range.periods().map(|period| TimeSeriesPoint {
            period,
            value: Self::value_at(&config.fallback_shape, range.start(), period),
        }));
        series
    }

    /// @ai:intent Evaluate the fallback curve for a single period
    /// @ai:effects pure
    fn value_at(shape: &FallbackShape, range_start: i32, period: i32) -> f64 {
        let offset = f64::from(period - range_start);
        let cycle = shape.cycle_periods.max(f64::EPSILON);
        let periodic = shape.amplitude * (TAU * f64::from(period) / cycle + shape.phase).sin();
        let raw = shape.base_level + periodic + shape.growth_per_period * offset;

        round_cents(raw.max(0.0))
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
