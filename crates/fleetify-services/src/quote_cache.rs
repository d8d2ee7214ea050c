//! Tenant-scoped quote cache
//!
//! Memoizes pricing results per company. The key holds the tenant, every
//! rate card field, the duration and the custom amount, so a change to any
//! input is a cache miss and one tenant's quotes are never served to another.

use fleetify_core::config::CacheConfig;
use fleetify_core::models::{PricingRequest, PricingResult};
use fleetify_core::traits::PricingService;
use fleetify_core::PricingError;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::pricing::PricingEngine;

/// Cache key for a quote
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    pub tenant_id: Uuid,
    pub request: PricingRequest,
}

impl QuoteKey {
    pub fn new(tenant_id: Uuid, request: &PricingRequest) -> Self {
        Self {
            tenant_id,
            request: request.clone(),
        }
    }
}

/// Bounded in-memory quote cache
///
/// When full, the cache is flushed before the next insert.
pub struct QuoteCache {
    entries: RwLock<HashMap<QuoteKey, PricingResult>>,
    max_entries: usize,
}

impl QuoteCache {
    /// Create a cache holding at most `max_entries` quotes
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Look up a cached quote
    pub fn get(&self, key: &QuoteKey) -> Option<PricingResult> {
        self.entries.read().get(key).cloned()
    }

    /// Store a quote
    pub fn insert(&self, key: QuoteKey, result: PricingResult) {
        let mut entries = self.entries.write();
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            debug!(
                size = entries.len(),
                tenant_id = %key.tenant_id,
                "Quote cache full, flushing"
            );
            entries.clear();
        }
        entries.insert(key, result);
    }

    /// Drop every quote cached for a tenant
    pub fn invalidate_tenant(&self, tenant_id: Uuid) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| key.tenant_id != tenant_id);
        before - entries.len()
    }

    /// Number of cached quotes
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Pricing service with an optional tenant-scoped cache in front
pub struct CachedPricingEngine<S: PricingService = PricingEngine> {
    inner: S,
    cache: Option<QuoteCache>,
}

impl<S: PricingService> CachedPricingEngine<S> {
    /// Wrap a pricing service; caching follows `config.enabled`
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let cache = config
            .enabled
            .then(|| QuoteCache::new(config.max_entries));
        Self { inner, cache }
    }

    /// The quote cache, if enabled
    pub fn cache(&self) -> Option<&QuoteCache> {
        self.cache.as_ref()
    }

    /// Price a rental on behalf of a tenant
    ///
    /// Successful results are cached; errors are not.
    ///
    /// # Errors
    ///
    /// See [`PricingService::price`].
    #[instrument(skip(self, request), fields(tenant_id = %tenant_id))]
    pub fn price_for(
        &self,
        tenant_id: Uuid,
        request: &PricingRequest,
    ) -> Result<PricingResult, PricingError> {
        let Some(cache) = &self.cache else {
            return self.inner.price(request);
        };

        let key = QuoteKey::new(tenant_id, request);
        if let Some(result) = cache.get(&key) {
            debug!("Quote cache HIT");
            return Ok(result);
        }

        debug!("Quote cache MISS");
        let result = self.inner.price(request)?;
        cache.insert(key, result.clone());
        Ok(result)
    }
}

impl<S: PricingService> PricingService for CachedPricingEngine<S> {
    /// Uncached pricing, for callers without a tenant
    fn price(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        self.inner.price(request)
    }
}
