//! @ai:module:intent Remote series retrieval and payload normalization
//! @ai:module:layer infrastructure
//! @ai:module:public_api SeriesFetcherTrait, HttpSeriesFetcher, MockSeriesFetcher, RateLimiter, normalize_payload

pub mod client;
pub mod payload;
pub mod rate_limiter;

pub use client::{HttpSeriesFetcher, MockBehavior, MockSeriesFetcher, SeriesFetcherTrait};
pub use payload::normalize_payload;
pub use rate_limiter::{RateLimiter, RateLimiterTrait};
