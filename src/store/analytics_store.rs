//! @ai:module:intent Reactive state container for a single resource type
//! @ai:module:layer application
//! @ai:module:public_api AnalyticsStore, CommitOutcome
//! @ai:module:stateless false

use crate::error::Result;
use crate::fallback::DeterministicFallbackGenerator;
use crate::fetcher::SeriesFetcherTrait;
use crate::resource::{ResourceType, ResourceTypeConfig};
use crate::series::{is_strictly_ascending, PeriodRange};
use crate::store::state::AnalyticsState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// @ai:intent What a range change ended up committing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Live,
    Degraded,
    /// A newer range was requested before this fetch resolved; nothing was committed.
    Superseded,
}

/// @ai:intent Owns the current series of one resource type and refetches on range changes
pub struct AnalyticsStore<F: SeriesFetcherTrait> {
    config: ResourceTypeConfig,
    fetcher: Arc<F>,
    state: watch::Sender<AnalyticsState>,
    latest_request: AtomicU64,
}

impl<F: SeriesFetcherTrait> AnalyticsStore<F> {
    /// @ai:intent Create an idle store for the given configuration
    /// @ai:effects pure
    pub fn new(config: ResourceTypeConfig, fetcher: Arc<F>, initial_range: PeriodRange) -> Self {
        let (state, _) = watch::channel(AnalyticsState::idle(initial_range));

        Self {
            config,
            fetcher,
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn resource(&self) -> ResourceType {
        self.config.resource
    }

    pub fn config(&self) -> &ResourceTypeConfig {
        &self.config
    }

    /// @ai:intent Synchronous snapshot of the current state
    /// @ai:effects pure
    pub fn get_state(&self) -> AnalyticsState {
        self.state.borrow().clone()
    }

    /// @ai:intent Receiver notified on every state replacement
    /// @ai:effects pure
    pub fn subscribe(&self) -> watch::Receiver<AnalyticsState> {
        self.state.subscribe()
    }

    /// @ai:intent Fetch the currently selected range
    /// @ai:effects network, state:write
    pub async fn initialize(&self) -> CommitOutcome {
        let range = self.state.borrow().range;
        self.set_range(range).await
    }

    /// @ai:intent Validate raw bounds, then change the range
    /// @ai:post on InvalidRange the state is untouched
    /// @ai:effects network, state:write
    pub async fn set_years(&self, start: i32, end: i32) -> Result<CommitOutcome> {
        let range = PeriodRange::new(start, end)?;
        Ok(self.set_range(range).await)
    }

    /// @ai:intent Enter loading, fetch the range and commit live or simulated data
    /// @ai:post only the most recently requested range is ever committed
    /// @ai:effects network, state:write
    pub async fn set_range(&self, range: PeriodRange) -> CommitOutcome {
        let mut request = 0;
        self.state.send_modify(|state| {
            request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
            *state = state.begin_loading(range);
        });

        tracing::debug!(
            "[{}] request #{} loading {}",
            self.config.key(),
            request,
            range
        );

        let (next, outcome) = match self.fetcher.fetch(&self.config, range).await {
            Ok(series) if is_strictly_ascending(&series) => {
                (AnalyticsState::live(series, range), CommitOutcome::Live)
            }
            Ok(_) => {
                tracing::warn!(
                    "[{}] fetcher returned unordered periods for {}, using simulated data",
                    self.config.key(),
                    range
                );
                (self.fallback_state(range), CommitOutcome::Degraded)
            }
            Err(e) => {
                tracing::warn!(
                    "[{}] fetch failed for {}, using simulated data: {}",
                    self.config.key(),
                    range,
                    e
                );
                (self.fallback_state(range), CommitOutcome::Degraded)
            }
        };

        // Checked under the channel lock so a newer request cannot slip in between.
        let committed = self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != request {
                return false;
            }
            *state = next;
            true
        });

        if !committed {
            tracing::debug!(
                "[{}] discarding superseded request #{} for {}",
                self.config.key(),
                request,
                range
            );
            return CommitOutcome::Superseded;
        }

        tracing::info!(
            "[{}] committed {} state for {}",
            self.config.key(),
            self.state.borrow().status(),
            range
        );
        outcome
    }

    fn fallback_state(&self, range: PeriodRange) -> AnalyticsState {
        let series = DeterministicFallbackGenerator::generate(&self.config, range);
        AnalyticsState::degraded(series, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fetcher::MockSeriesFetcher;
    use crate::series::TimeSeriesPoint;
    use crate::store::state::StoreStatus;
    use serde_json::json;
    use std::time::Duration;

    fn range(start: i32, end: i32) -> PeriodRange {
        PeriodRange::new(start, end).unwrap()
    }

    fn yearly_series() -> Vec<TimeSeriesPoint> {
        (2000..=2050)
            .map(|year| TimeSeriesPoint::new(year, f64::from(year - 2000)))
            .collect()
    }

    fn store_with(
        fetcher: MockSeriesFetcher,
        initial: PeriodRange,
    ) -> AnalyticsStore<MockSeriesFetcher> {
        AnalyticsStore::new(ResourceType::Wind.config(), Arc::new(fetcher), initial)
    }

    #[tokio::test]
    async fn test_successful_fetch_commits_live_state() {
        let store = store_with(MockSeriesFetcher::series(yearly_series()), range(2020, 2022));

        let outcome = store.initialize().await;
        let state = store.get_state();

        assert_eq!(outcome, CommitOutcome::Live);
        assert_eq!(state.status(), StoreStatus::Live);
        assert_eq!(state.series.len(), 3);
        assert_eq!(state.projection, Some(22.0));
        assert!(state.is_consistent());
    }

    #[tokio::test]
    async fn test_full_fallback_cycle() {
        let store = store_with(MockSeriesFetcher::failing("connection refused"), range(2020, 2030));

        let outcome = store.set_range(range(2025, 2027)).await;
        let state = store.get_state();

        assert_eq!(outcome, CommitOutcome::Degraded);
        assert!(state.degraded);
        assert!(!state.loading);

        let periods: Vec<_> = state.series.iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![2025, 2026, 2027]);

        let wind = ResourceType::Wind.config();
        let expected = DeterministicFallbackGenerator::generate(&wind, range(2025, 2027));
        assert_eq!(state.series, expected);
        assert_eq!(state.projection, expected.last().map(|p| p.value));
    }

    #[tokio::test]
    async fn test_invalid_payload_falls_back() {
        let store = store_with(
            MockSeriesFetcher::payload(json!({"data": [{"year": 2025, "production": "n/a"}]})),
            range(2025, 2025),
        );

        assert_eq!(store.initialize().await, CommitOutcome::Degraded);
        assert!(store.get_state().degraded);
    }

    #[tokio::test]
    async fn test_degraded_flag_follows_fetch_result() {
        let failing = store_with(MockSeriesFetcher::failing("down"), range(2025, 2026));
        failing.initialize().await;
        assert!(failing.get_state().degraded);

        let live = store_with(MockSeriesFetcher::series(yearly_series()), range(2025, 2026));
        live.initialize().await;
        assert!(!live.get_state().degraded);
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_and_state_untouched() {
        let store = store_with(MockSeriesFetcher::series(yearly_series()), range(2020, 2021));
        store.initialize().await;
        let before = store.get_state();

        let err = store.set_years(2030, 2025).await.unwrap_err();

        assert!(matches!(err, Error::InvalidRange { start: 2030, end: 2025, .. }));
        assert_eq!(store.get_state(), before);
    }

    #[tokio::test]
    async fn test_oversized_range_is_rejected_before_fetching() {
        let fetcher = Arc::new(MockSeriesFetcher::failing("down"));
        let store =
            AnalyticsStore::new(ResourceType::Solar.config(), fetcher.clone(), range(2025, 2026));
        let before = store.get_state();

        let err = store.set_years(0, i32::MAX).await.unwrap_err();

        assert!(matches!(err, Error::InvalidRange { start: 0, end: i32::MAX, .. }));
        assert_eq!(store.get_state(), before);
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_fetch_never_overwrites_newer_range() {
        let slow = range(2020, 2022);
        let fast = range(2025, 2026);
        let fetcher = MockSeriesFetcher::series(yearly_series())
            .with_delay(slow, Duration::from_millis(150))
            .with_delay(fast, Duration::from_millis(10));
        let store = store_with(fetcher, range(2010, 2011));

        let (first, second) = tokio::join!(store.set_range(slow), store.set_range(fast));

        assert_eq!(first, CommitOutcome::Superseded);
        assert_eq!(second, CommitOutcome::Live);

        let state = store.get_state();
        assert_eq!(state.range, fast);
        assert_eq!(
            state.series.iter().map(|p| p.period).collect::<Vec<_>>(),
            vec![2025, 2026]
        );
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_loading_state_is_visible_while_fetch_in_flight() {
        let slow = range(2030, 2031);
        let fetcher =
            MockSeriesFetcher::failing("down").with_delay(slow, Duration::from_millis(100));
        let store = store_with(fetcher, range(2020, 2020));

        let observe = async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            store.get_state()
        };
        let (_, mid) = tokio::join!(store.set_range(slow), observe);

        assert!(mid.loading);
        assert_eq!(mid.range, slow);
        assert!(!store.get_state().loading);
    }

    #[tokio::test]
    async fn test_subscribers_see_every_committed_state_consistent() {
        let store = store_with(MockSeriesFetcher::series(yearly_series()), range(2020, 2024));
        let mut updates = store.subscribe();

        store.initialize().await;
        assert!(updates.has_changed().unwrap());

        let seen = updates.borrow_and_update().clone();
        assert!(seen.is_consistent());
        assert_eq!(seen.status(), StoreStatus::Live);
    }

    #[tokio::test]
    async fn test_stores_do_not_share_state() {
        let fetcher = Arc::new(MockSeriesFetcher::failing("down"));
        let wind =
            AnalyticsStore::new(ResourceType::Wind.config(), fetcher.clone(), range(2025, 2027));
        let solar = AnalyticsStore::new(ResourceType::Solar.config(), fetcher, range(2025, 2027));

        wind.initialize().await;

        assert!(wind.get_state().degraded);
        assert!(solar.get_state().series.is_empty());
        assert!(!solar.get_state().degraded);
    }
}
