//! @ai:module:intent HTTP client for the remote production-data endpoint
//! @ai:module:layer infrastructure
//! @ai:module:public_api SeriesFetcherTrait, HttpSeriesFetcher, MockSeriesFetcher
//! @ai:module:stateless false

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::fetcher::payload::normalize_payload;
use crate::fetcher::rate_limiter::{RateLimiter, RateLimiterTrait};
use crate::resource::ResourceTypeConfig;
use crate::series::{PeriodRange, TimeSeriesPoint};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// @ai:intent Trait for retrieving a resource's series over a period range
#[allow(async_fn_in_trait)]
pub trait SeriesFetcherTrait: Send + Sync {
    /// @ai:intent Fetch and normalize the series for one resource type
    /// @ai:post Ok series has strictly ascending periods
    async fn fetch(
        &self,
        config: &ResourceTypeConfig,
        range: PeriodRange,
    ) -> Result<Vec<TimeSeriesPoint>>;
}

/// @ai:intent Production-data client with rate limiting
pub struct HttpSeriesFetcher {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<RateLimiter>,
}

impl HttpSeriesFetcher {
    /// @ai:intent Create a new fetcher from API configuration
    /// @ai:effects pure
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let rate_limiter = Arc::new(RateLimiter::new(config.requests_per_minute));
        Self::with_rate_limiter(config, rate_limiter)
    }

    /// @ai:intent Create a fetcher sharing an existing rate limiter
    /// @ai:effects pure
    pub fn with_rate_limiter(config: &ApiConfig, rate_limiter: Arc<RateLimiter>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter,
        })
    }

    /// @ai:intent Full URL of a resource endpoint, without query
    /// @ai:effects pure
    pub fn endpoint_url(&self, config: &ResourceTypeConfig) -> String {
        format!("{}{}", self.base_url, config.endpoint_path)
    }
}

impl SeriesFetcherTrait for HttpSeriesFetcher {
    /// @ai:intent GET the endpoint scoped to the range and normalize the body
    /// @ai:effects network
    async fn fetch(
        &self,
        config: &ResourceTypeConfig,
        range: PeriodRange,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.rate_limiter.wait().await;

        let url = self.endpoint_url(config);
        tracing::debug!("Fetching {} for {}", url, range);

        let response = self
            .client
            .get(&url)
            .query(&[("start_year", range.start()), ("end_year", range.end())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!("{} returned {}", url, status)));
        }

        let body = response.bytes().await?;
        let payload: Value =
            serde_json::from_slice(&body).map_err(|e| Error::InvalidResponseShape {
                reason: format!("body is not JSON: {}", e),
                malformed_records: 0,
            })?;

        normalize_payload(&payload)
    }
}

/// @ai:intent Canned behaviour of a mock fetcher
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the points of this series that fall inside the requested range.
    Series(Vec<TimeSeriesPoint>),
    /// Run this raw body through payload normalization.
    Payload(Value),
    /// Fail every call with a network error.
    Fail(String),
}

/// @ai:intent Mock fetcher for tests and offline runs
pub struct MockSeriesFetcher {
    behavior: MockBehavior,
    delays: HashMap<PeriodRange, Duration>,
    calls: AtomicUsize,
}

impl MockSeriesFetcher {
    /// @ai:intent Create a mock with the given behaviour
    /// @ai:effects pure
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delays: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn series(series: Vec<TimeSeriesPoint>) -> Self {
        Self::new(MockBehavior::Series(series))
    }

    pub fn payload(body: Value) -> Self {
        Self::new(MockBehavior::Payload(body))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }

    /// @ai:intent Delay responses for one specific range
    /// @ai:effects pure
    pub fn with_delay(mut self, range: PeriodRange, delay: Duration) -> Self {
        self.delays.insert(range, delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SeriesFetcherTrait for MockSeriesFetcher {
    /// @ai:intent Return the canned response after the configured delay
    /// @ai:effects time
    async fn fetch(
        &self,
        _config: &ResourceTypeConfig,
        range: PeriodRange,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&range) {
            tokio::time::sleep(*delay).await;
        }

        match &self.behavior {
            MockBehavior::Series(series) => Ok(series
                .iter()
                .filter(|point| range.contains(point.period))
                .copied()
                .collect()),
            MockBehavior::Payload(body) => normalize_payload(body),
            MockBehavior::Fail(message) => Err(Error::Network(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceType;
    use serde_json::json;

    fn range(start: i32, end: i32) -> PeriodRange {
        PeriodRange::new(start, end).unwrap()
    }

    #[tokio::test]
    async fn test_mock_series_is_scoped_to_range() {
        let fetcher = MockSeriesFetcher::series(
            (2020..=2030)
                .map(|year| TimeSeriesPoint::new(year, f64::from(year)))
                .collect(),
        );

        let series = fetcher
            .fetch(&ResourceType::Solar.config(), range(2024, 2025))
            .await
            .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].period, 2024);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_payload_goes_through_normalization() {
        let fetcher = MockSeriesFetcher::payload(json!({"items": []}));
        let err = fetcher
            .fetch(&ResourceType::Wind.config(), range(2025, 2025))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponseShape { .. }));
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "https://energy.example.org/".to_string(),
            ..Default::default()
        };
        let fetcher = HttpSeriesFetcher::new(&config).unwrap();

        assert_eq!(
            fetcher.endpoint_url(&ResourceType::Hydro.config()),
            "https://energy.example.org/api/hydro/production"
        );
    }

    #[tokio::test]
    async fn test_http_fetch_against_closed_port_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            requests_per_minute: 0,
        };
        let fetcher = HttpSeriesFetcher::new(&config).unwrap();

        let err = fetcher
            .fetch(&ResourceType::Wind.config(), range(2025, 2027))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
