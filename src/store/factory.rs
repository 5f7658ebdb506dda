//! @ai:module:intent Create isolated analytics stores, one per resource type
//! @ai:module:layer application
//! @ai:module:public_api create_store, StoreSet
//! @ai:module:stateless false

use crate::error::Result;
use crate::fetcher::SeriesFetcherTrait;
use crate::resource::{ResourceType, ResourceTypeRegistry};
use crate::series::PeriodRange;
use crate::store::analytics_store::{AnalyticsStore, CommitOutcome};
use std::collections::BTreeMap;
use std::sync::Arc;

/// @ai:intent Build a fresh store for a registered resource key
/// @ai:pre key is registered
/// @ai:effects pure
pub fn create_store<F: SeriesFetcherTrait>(
    registry: &ResourceTypeRegistry,
    key: &str,
    fetcher: Arc<F>,
    initial_range: PeriodRange,
) -> Result<AnalyticsStore<F>> {
    let config = registry.get_config(key)?.clone();
    Ok(AnalyticsStore::new(config, fetcher, initial_range))
}

/// @ai:intent Caller-owned map holding exactly one store per resource type
pub struct StoreSet<F: SeriesFetcherTrait> {
    registry: ResourceTypeRegistry,
    fetcher: Arc<F>,
    initial_range: PeriodRange,
    stores: BTreeMap<ResourceType, Arc<AnalyticsStore<F>>>,
}

impl<F: SeriesFetcherTrait> StoreSet<F> {
    /// @ai:intent Create an empty set; stores are created on first use
    /// @ai:effects pure
    pub fn new(
        registry: ResourceTypeRegistry,
        fetcher: Arc<F>,
        initial_range: PeriodRange,
    ) -> Self {
        Self {
            registry,
            fetcher,
            initial_range,
            stores: BTreeMap::new(),
        }
    }

    /// @ai:intent Return the store for a key, creating it the first time
    /// @ai:post repeated calls with the same key return the same instance
    /// @ai:effects state:write
    pub fn get_or_create(&mut self, key: &str) -> Result<Arc<AnalyticsStore<F>>> {
        let resource = self.registry.get_config(key)?.resource;

        if let Some(store) = self.stores.get(&resource) {
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(create_store(
            &self.registry,
            resource.as_str(),
            Arc::clone(&self.fetcher),
            self.initial_range,
        )?);
        tracing::debug!("Created analytics store for {}", resource);
        self.stores.insert(resource, Arc::clone(&store));
        Ok(store)
    }

    /// @ai:intent Create every registered store that does not exist yet
    /// @ai:effects state:write
    pub fn create_all(&mut self) -> Result<Vec<Arc<AnalyticsStore<F>>>> {
        let resources: Vec<_> = self.registry.resource_types().collect();
        resources
            .into_iter()
            .map(|resource| self.get_or_create(resource.as_str()))
            .collect()
    }

    /// @ai:intent Initialize every existing store in registration order
    /// @ai:effects network, state:write
    pub async fn initialize_all(&self) -> Vec<(ResourceType, CommitOutcome)> {
        let mut outcomes = Vec::with_capacity(self.stores.len());
        for (resource, store) in &self.stores {
            outcomes.push((*resource, store.initialize().await));
        }
        outcomes
    }

    pub fn get(&self, resource: ResourceType) -> Option<&Arc<AnalyticsStore<F>>> {
        self.stores.get(&resource)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AnalyticsStore<F>>> {
        self.stores.values()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn registry(&self) -> &ResourceTypeRegistry {
        &self.registry
    }
}
