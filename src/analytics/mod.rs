//! @ai:module:intent Read-only statistics over store snapshots
//! @ai:module:layer application
//! @ai:module:public_api SeriesSummary, PortfolioAggregator, PortfolioOverview, ResourceOverview

pub mod aggregator;
pub mod summary;

pub use aggregator::{
    PortfolioAggregator, PortfolioAggregatorTrait, PortfolioOverview, ResourceOverview,
};
pub use summary::SeriesSummary;
