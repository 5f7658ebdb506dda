//! @ai:module:intent Per-resource reactive analytics stores and their factory
//! @ai:module:layer application
//! @ai:module:public_api AnalyticsStore, AnalyticsState, StoreStatus, CommitOutcome, create_store, StoreSet

pub mod analytics_store;
pub mod factory;
pub mod state;

pub use analytics_store::{AnalyticsStore, CommitOutcome};
pub use factory::{create_store, StoreSet};
pub use state::{AnalyticsState, StoreStatus};
