//! Cached links service: the entry point a host calls to get a list's links.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use airlinks_cache::{CacheConfig, CacheStats, LinkCache};
use airlinks_core::error::Result;
use airlinks_core::traits::RecordStore;
use airlinks_core::types::{Link, List, ListRef, Settings};

use crate::client::AirtableClient;
use crate::resolver::{resolve_links, resolve_list};

/// Service configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Cache configuration
    pub cache: CacheConfig,
}

/// Result of a lookup with metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct LinksResult {
    /// Record identifier of the list
    pub list_id: String,
    /// Resolved links
    pub links: Vec<Link>,
    /// Whether the result came from cache
    pub from_cache: bool,
}

/// Resolves lists to links through a [`RecordStore`], caching results.
///
/// Lookups of the same list are single-flight: while one resolution is in
/// progress, other callers for that list wait for it and are then served from
/// the cache. Lookups of different lists run independently.
pub struct LinksService<S> {
    store: S,
    cache: LinkCache,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: RecordStore> LinksService<S> {
    /// Creates a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    /// Creates a service with custom configuration.
    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self {
            store,
            cache: LinkCache::with_config(config.cache),
            in_flight: DashMap::new(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the links of a list given by record identifier or URL.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = LinksService::new(AirtableClient::new(settings)?);
    /// let links = service.get_links("recAAAAAAAAA").await?;
    /// ```
    pub async fn get_links(&self, input: &str) -> Result<Vec<Link>> {
        Ok(self.get_links_detailed(input).await?.links)
    }

    /// Returns the links of a list with cache metadata.
    #[instrument(skip(self))]
    pub async fn get_links_detailed(&self, input: &str) -> Result<LinksResult> {
        let list_ref = ListRef::parse(input)?;
        let list_id = list_ref.record_id().to_string();

        if let Some(result) = self.cached(&list_id) {
            return Ok(result);
        }

        let flight = InFlight::join(&self.in_flight, &list_id);
        let _held = flight.lock.lock().await;

        // Another caller may have resolved it while we waited.
        if let Some(result) = self.cached(&list_id) {
            return Ok(result);
        }
        self.resolve_and_store(&list_id).await
    }

    /// Resolves a list without touching the cache.
    #[instrument(skip(self))]
    pub async fn resolve_list(&self, input: &str) -> Result<List> {
        let list_ref = ListRef::parse(input)?;
        let scope = self.store.scope()?;
        resolve_list(&self.store, &scope, list_ref.record_id()).await
    }

    /// Drops the cached links of one list.
    pub fn invalidate(&self, list_id: &str) -> bool {
        self.cache.remove(list_id)
    }

    /// Drops all cached links.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn cached(&self, list_id: &str) -> Option<LinksResult> {
        let entry = self.cache.get(list_id)?;
        debug!(list_id, "Cache hit");
        Some(LinksResult {
            list_id: list_id.to_string(),
            links: entry.links,
            from_cache: true,
        })
    }

    async fn resolve_and_store(&self, list_id: &str) -> Result<LinksResult> {
        debug!(list_id, "Cache miss, resolving");

        let generation = self.cache.generation();
        let scope = self.store.scope()?;
        let list = resolve_list(&self.store, &scope, list_id).await?;
        let links = resolve_links(&self.store, &scope, &list).await?;

        if self.cache.put_if_current(list_id, links.clone(), generation) {
            info!(list_id, count = links.len(), "Cached links");
        }

        Ok(LinksResult {
            list_id: list_id.to_string(),
            links,
            from_cache: false,
        })
    }
}

/// Membership in the single-flight group for one list.
///
/// Dropping it, on completion or cancellation, removes the group's lock from
/// the map once no other caller holds it.
struct InFlight<'a> {
    map: &'a DashMap<String, Arc<Mutex<()>>>,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> InFlight<'a> {
    fn join(map: &'a DashMap<String, Arc<Mutex<()>>>, key: &'a str) -> Self {
        let lock = map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        Self { map, key, lock }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.map.remove_if(self.key, |_, lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2
        });
    }
}

impl LinksService<AirtableClient> {
    /// Creates a service talking to the public Airtable API.
    pub fn airtable(settings: Settings) -> Result<Self> {
        Ok(Self::new(AirtableClient::new(settings)?))
    }

    /// Replaces the client settings.
    ///
    /// The cache is cleared when the base or a table changed, since cached
    /// links were resolved against the old ones.
    pub fn update_settings(&self, settings: Settings) {
        if self.store.update_settings(settings) {
            info!("Remote scope changed, clearing cache");
            self.cache.clear();
        }
    }
}
