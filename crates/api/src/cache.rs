//! Tag-coherent cache for query results.
//!
//! Two structures carry the whole contract: a `moka` store keyed by
//! (endpoint, parameters), and a reverse index from tags to the keys whose
//! results depend on them. Queries declare the tags they *provide*; mutations
//! declare the tags they *invalidate*. After a mutation resolves successfully,
//! every entry providing an invalidated tag is marked stale and re-fetched on
//! its next read. A failed mutation invalidates nothing.
//!
//! Eviction (capacity and TTL) is `moka`'s concern; the index is kept in sync
//! through an eviction listener.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use moka::notification::RemovalCause;
use tracing::{debug, warn};

use crate::error::ApiError;

// =============================================================================
// Tags
// =============================================================================

/// A REST resource family the cache tracks dependencies for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Categories,
    Products,
    Orders,
    Payments,
    Shipments,
    Zones,
    Rates,
    Coupons,
    Reviews,
    Customers,
    Analytics,
    Settings,
}

/// A dependency tag, either a whole resource family or one entity within it.
///
/// Invalidating the coarse tag invalidates every key registered under the
/// family, including keys that only provided fine tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The whole family (e.g. "Orders").
    All(Resource),
    /// One entity within a family (e.g. "Orders:42").
    Entity(Resource, String),
}

impl Tag {
    /// The coarse tag for a resource family.
    #[must_use]
    pub const fn all(resource: Resource) -> Self {
        Self::All(resource)
    }

    /// The fine tag for one entity.
    pub fn entity(resource: Resource, id: impl Into<String>) -> Self {
        Self::Entity(resource, id.into())
    }

    /// The family this tag belongs to.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        match self {
            Self::All(resource) | Self::Entity(resource, _) => *resource,
        }
    }
}

// =============================================================================
// Keys and results
// =============================================================================

/// Cache key for a query: the endpoint name plus its rendered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    endpoint: &'static str,
    params: String,
}

impl QueryKey {
    /// Key for an endpoint with pre-rendered parameters.
    pub fn new(endpoint: &'static str, params: impl Into<String>) -> Self {
        Self {
            endpoint,
            params: params.into(),
        }
    }

    /// Key for an endpoint with a parameter list.
    #[must_use]
    pub fn with_params(endpoint: &'static str, params: &[(&'static str, String)]) -> Self {
        let rendered = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        Self::new(endpoint, rendered)
    }

    /// The endpoint portion of the key.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        self.endpoint
    }
}

/// Where a query result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fetched from the server just now.
    Network,
    /// Served from a fresh cache entry without a network call.
    Cache,
    /// Served from a stale cache entry because the re-fetch failed.
    StaleCache,
}

/// A query result together with its provenance.
///
/// When a re-fetch fails but a stale value is still cached, the stale value is
/// returned with `origin == StaleCache` and the failure in `error`, so the
/// caller can render known data next to an error banner.
#[derive(Debug)]
pub struct QueryResult<T> {
    /// The result value.
    pub value: T,
    /// Where the value came from.
    pub origin: Origin,
    /// The re-fetch failure, when `value` is stale.
    pub error: Option<ApiError>,
}

impl<T> QueryResult<T> {
    fn network(value: T) -> Self {
        Self {
            value,
            origin: Origin::Network,
            error: None,
        }
    }

    fn cached(value: T) -> Self {
        Self {
            value,
            origin: Origin::Cache,
            error: None,
        }
    }

    fn stale(value: T, error: ApiError) -> Self {
        Self {
            value,
            origin: Origin::StaleCache,
            error: Some(error),
        }
    }

    /// Whether the value is a stale fallback.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self.origin, Origin::StaleCache)
    }

    /// Discard provenance and keep the value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

// =============================================================================
// Cache
// =============================================================================

#[derive(Clone)]
struct CachedEntry {
    value: Arc<dyn Any + Send + Sync>,
    stale: bool,
}

#[derive(Default)]
struct TagIndex {
    by_tag: HashMap<Tag, HashSet<QueryKey>>,
    by_resource: HashMap<Resource, HashSet<QueryKey>>,
}

impl TagIndex {
    fn register(&mut self, key: &QueryKey, provides: &[Tag]) {
        for tag in provides {
            self.by_resource
                .entry(tag.resource())
                .or_default()
                .insert(key.clone());
            self.by_tag.entry(tag.clone()).or_default().insert(key.clone());
        }
    }

    fn keys_for(&self, tag: &Tag) -> HashSet<QueryKey> {
        let keys = match tag {
            Tag::All(resource) => self.by_resource.get(resource),
            Tag::Entity(_, _) => self.by_tag.get(tag),
        };
        keys.cloned().unwrap_or_default()
    }

    fn remove_key(&mut self, key: &QueryKey) {
        for keys in self.by_tag.values_mut() {
            keys.remove(key);
        }
        for keys in self.by_resource.values_mut() {
            keys.remove(key);
        }
    }

    fn clear(&mut self) {
        self.by_tag.clear();
        self.by_resource.clear();
    }
}

/// Tag-coherent query cache.
pub struct TagCache {
    entries: MokaCache<QueryKey, CachedEntry>,
    index: Arc<RwLock<TagIndex>>,
}

impl TagCache {
    /// Create a cache with the given capacity and entry time-to-live.
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let index = Arc::new(RwLock::new(TagIndex::default()));

        // Keep the reverse index in sync when moka reclaims entries. Replaced
        // entries keep their registration - the replacement re-registers or is
        // the same key marked stale.
        let listener_index = Arc::clone(&index);
        let entries = MokaCache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .eviction_listener(move |key: Arc<QueryKey>, _value, cause| {
                if cause == RemovalCause::Replaced {
                    return;
                }
                listener_index
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove_key(&key);
            })
            .build();

        Self { entries, index }
    }

    /// Run a query through the cache.
    ///
    /// A fresh entry for `key` is returned without a network call. Otherwise
    /// `fetch` runs; on success the result is cached under `key` and registered
    /// against `provides`. On failure a stale entry, when present, is returned
    /// alongside the error; with nothing cached the error propagates.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when it fails and no previously cached value is
    /// available.
    pub async fn query<T, F, Fut>(
        &self,
        key: QueryKey,
        provides: Vec<Tag>,
        fetch: F,
    ) -> Result<QueryResult<T>, ApiError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let prior = self.entries.get(&key).await;

        if let Some(entry) = &prior
            && !entry.stale
            && let Some(value) = entry.value.downcast_ref::<T>()
        {
            debug!(endpoint = key.endpoint(), "cache hit");
            return Ok(QueryResult::cached(value.clone()));
        }

        match fetch().await {
            Ok(value) => {
                self.entries
                    .insert(
                        key.clone(),
                        CachedEntry {
                            value: Arc::new(value.clone()),
                            stale: false,
                        },
                    )
                    .await;
                self.index
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .register(&key, &provides);
                Ok(QueryResult::network(value))
            }
            Err(error) => {
                if let Some(entry) = prior
                    && let Some(value) = entry.value.downcast_ref::<T>()
                {
                    warn!(
                        endpoint = key.endpoint(),
                        error = %error,
                        "re-fetch failed, serving stale cached value"
                    );
                    return Ok(QueryResult::stale(value.clone(), error));
                }
                Err(error)
            }
        }
    }

    /// Run a mutation, invalidating `invalidates` only if it succeeds.
    ///
    /// # Errors
    ///
    /// Propagates the mutation's error; nothing is invalidated in that case.
    pub async fn mutate<T, F, Fut>(&self, invalidates: &[Tag], run: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let value = run().await?;
        self.invalidate(invalidates).await;
        Ok(value)
    }

    /// Mark every entry depending on any of `tags` as stale.
    ///
    /// Idempotent: re-invalidating an already-stale entry is a no-op. Stale
    /// entries stay servable as fallbacks until their next successful re-fetch
    /// or eviction.
    pub async fn invalidate(&self, tags: &[Tag]) {
        let keys: HashSet<QueryKey> = {
            let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
            tags.iter().flat_map(|tag| index.keys_for(tag)).collect()
        };

        debug!(tags = ?tags, affected = keys.len(), "invalidating cache entries");

        for key in keys {
            if let Some(entry) = self.entries.get(&key).await
                && !entry.stale
            {
                self.entries
                    .insert(
                        key,
                        CachedEntry {
                            value: entry.value,
                            stale: true,
                        },
                    )
                    .await;
            }
        }
    }

    /// Drop every cached entry and registration.
    pub async fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        self.index
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
