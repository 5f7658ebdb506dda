//! @ai:module:intent Snapshot of one resource type's analytics state
//! @ai:module:layer domain
//! @ai:module:public_api AnalyticsState, StoreStatus
//! @ai:module:stateless true

use crate::series::{is_strictly_ascending, PeriodRange, TimeSeriesPoint};
use serde::Serialize;

/// @ai:intent Lifecycle position of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Loading,
    Live,
    Degraded,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Loading => "loading",
            StoreStatus::Live => "live",
            StoreStatus::Degraded => "degraded",
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Series, projection and flags of a store, always replaced wholesale
/// @ai:invariant projection == series.last().value, degraded iff series is simulated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsState {
    pub series: Vec<TimeSeriesPoint>,
    pub projection: Option<f64>,
    pub loading: bool,
    pub degraded: bool,
    pub range: PeriodRange,
}

impl AnalyticsState {
    /// @ai:intent State of a store that has not fetched yet
    /// @ai:effects pure
    pub fn idle(range: PeriodRange) -> Self {
        Self::settled(Vec::new(), range, false)
    }

    /// @ai:intent State committed after a successful fetch
    /// @ai:effects pure
    pub fn live(series: Vec<TimeSeriesPoint>, range: PeriodRange) -> Self {
        Self::settled(series, range, false)
    }

    /// @ai:intent State committed after a failed fetch, holding simulated data
    /// @ai:effects pure
    pub fn degraded(series: Vec<TimeSeriesPoint>, range: PeriodRange) -> Self {
        Self::settled(series, range, true)
    }

    fn settled(series: Vec<TimeSeriesPoint>, range: PeriodRange, degraded: bool) -> Self {
        Self {
            projection: series.last().map(|point| point.value),
            series,
            loading: false,
            degraded,
            range,
        }
    }

    /// @ai:intent Enter loading for a new range, keeping the last committed series
    /// @ai:effects pure
    pub fn begin_loading(&self, range: PeriodRange) -> Self {
        Self {
            loading: true,
            range,
            ..self.clone()
        }
    }

    pub fn status(&self) -> StoreStatus {
        if self.loading {
            StoreStatus::Loading
        } else if self.degraded {
            StoreStatus::Degraded
        } else {
            StoreStatus::Live
        }
    }

    /// @ai:intent Check ordering and projection invariants
    /// @ai:effects pure
    pub fn is_consistent(&self) -> bool {
        is_strictly_ascending(&self.series)
            && self.projection == self.series.last().map(|point| point.value)
    }
}
