//! @ai:module:intent Cross-resource aggregation of store snapshots
//! @ai:module:layer application
//! @ai:module:public_api PortfolioAggregator, PortfolioOverview, ResourceOverview
//! @ai:module:stateless true

use crate::analytics::summary::SeriesSummary;
use crate::resource::ResourceType;
use crate::store::{AnalyticsState, StoreStatus};
use serde::Serialize;

/// @ai:intent Trait for portfolio aggregation
pub trait PortfolioAggregatorTrait: Send + Sync {
    /// @ai:intent Aggregate per-resource snapshots into one overview
    fn aggregate(&self, snapshots: &[(ResourceType, AnalyticsState)]) -> PortfolioOverview;
}

/// @ai:intent Overview line for one resource type
#[derive(Debug, Clone, Serialize)]
pub struct ResourceOverview {
    pub resource: ResourceType,
    pub status: StoreStatus,
    pub projection: Option<f64>,
    /// Percentage of the combined projection, absent when the combined projection is zero.
    pub share: Option<f64>,
    pub summary: Option<SeriesSummary>,
}

/// @ai:intent Combined view across every tracked resource type
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioOverview {
    pub resources: Vec<ResourceOverview>,
    pub combined_projection: f64,
    pub degraded_count: usize,
}

impl PortfolioOverview {
    /// @ai:intent Whether any resource is showing simulated data
    /// @ai:effects pure
    pub fn has_simulated_data(&self) -> bool {
        self.degraded_count > 0
    }

    /// @ai:intent Resource with the largest projection
    /// @ai:effects pure
    pub fn leader(&self) -> Option<&ResourceOverview> {
        self.resources
            .iter()
            .filter(|entry| entry.projection.is_some())
            .max_by(|a, b| {
                a.projection
                    .partial_cmp(&b.projection)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// @ai:intent Aggregates store snapshots into a portfolio overview
pub struct PortfolioAggregator;

impl PortfolioAggregator {
    /// @ai:intent Create a new portfolio aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    fn share_of(projection: Option<f64>, combined: f64) -> Option<f64> {
        if combined <= 0.0 {
            return None;
        }
        projection.map(|value| value / combined * 100.0)
    }
}

impl Default for PortfolioAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioAggregatorTrait for PortfolioAggregator {
    /// @ai:intent Aggregate snapshots in the order given
    /// @ai:effects pure
    fn aggregate(&self, snapshots: &[(ResourceType, AnalyticsState)]) -> PortfolioOverview {
        let combined_projection: f64 = snapshots
            .iter()
            .filter_map(|(_, state)| state.projection)
            .sum();

        let degraded_count = snapshots.iter().filter(|(_, state)| state.degraded).count();

        let resources = snapshots
            .iter()
            .map(|(resource, state)| ResourceOverview {
                resource: *resource,
                status: state.status(),
                projection: state.projection,
                share: Self::share_of(state.projection, combined_projection),
                summary: SeriesSummary::from_series(&state.series),
            })
            .collect();

        PortfolioOverview {
            resources,
            combined_projection,
            degraded_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{PeriodRange, TimeSeriesPoint};

    fn range() -> PeriodRange {
        PeriodRange::new(2025, 2026).unwrap()
    }

    fn live(values: &[f64]) -> AnalyticsState {
        let series = values
            .iter()
            .enumerate()
            .map(|(i, value)| TimeSeriesPoint::new(2025 + i as i32, *value))
            .collect();
        AnalyticsState::live(series, range())
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let overview = PortfolioAggregator::new().aggregate(&[
            (ResourceType::Solar, live(&[10.0, 30.0])),
            (ResourceType::Wind, live(&[50.0, 70.0])),
        ]);

        assert_eq!(overview.combined_projection, 100.0);
        assert_eq!(overview.resources[0].share, Some(30.0));
        assert_eq!(overview.resources[1].share, Some(70.0));
        assert_eq!(overview.leader().map(|e| e.resource), Some(ResourceType::Wind));
        assert!(!overview.has_simulated_data());
    }

    #[test]
    fn test_degraded_and_empty_states() {
        let degraded = AnalyticsState::degraded(vec![TimeSeriesPoint::new(2025, 5.0)], range());
        let overview = PortfolioAggregator::new().aggregate(&[
            (ResourceType::Hydro, degraded),
            (ResourceType::Biomass, AnalyticsState::idle(range())),
        ]);

        assert_eq!(overview.degraded_count, 1);
        assert!(overview.has_simulated_data());
        assert_eq!(overview.resources[1].projection, None);
        assert_eq!(overview.resources[1].share, None);
        assert!(overview.resources[1].summary.is_none());
    }

    #[test]
    fn test_empty_portfolio() {
        let overview = PortfolioAggregator::new().aggregate(&[]);
        assert_eq!(overview.combined_projection, 0.0);
        assert!(overview.leader().is_none());
    }
}
