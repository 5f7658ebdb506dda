//! @ai:module:intent Per-resource analytics stores and report synthesis for renewable-energy data
//! @ai:module:layer application
//! @ai:module:public_api config, resource, series, fallback, fetcher, store, analytics, report

pub mod analytics;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod report;
pub mod resource;
pub mod series;
pub mod store;

pub use analytics::{PortfolioAggregator, PortfolioOverview, SeriesSummary};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use fallback::DeterministicFallbackGenerator;
pub use fetcher::{HttpSeriesFetcher, MockSeriesFetcher, SeriesFetcherTrait};
pub use report::{ReportComposer, ReportDocument, ReportPipeline};
pub use resource::{ResourceType, ResourceTypeConfig, ResourceTypeRegistry};
pub use series::{PeriodRange, TimeSeriesPoint};
pub use store::{create_store, AnalyticsState, AnalyticsStore, CommitOutcome, StoreSet};
