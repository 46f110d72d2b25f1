//! Resolver — the single entry point for turning ids into items.
//!
//! Per request:
//!
//! 1. Parse and normalize the raw id.
//! 2. Check the cache. A positive hit is returned as-is; a fresh
//!    negative hit is `NotFound` without touching any provider.
//! 3. Otherwise walk the registry's providers in order, skipping those
//!    that don't serve the id's namespace. The first item found is
//!    cached and returned. Provider errors are logged and the walk
//!    continues.
//! 4. If every provider missed or failed, cache a negative marker and
//!    return `NotFound`.
//!
//! Each provider call runs on the blocking pool under a timeout, so a
//! hung or panicking plugin costs one provider slot, never the caller.
//! Concurrent requests for the same uncached id may each fan out.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::cache::{CacheLookup, CachePolicy, Clock, ResolutionCache, SystemClock};
use crate::config::{ConfigError, ResolverConfig};
use crate::identifier::{Identifier, IdentifierError};
use crate::provider::{ItemHandle, ItemProvider, PluginHost, ProviderError, ResolvedItem};
use crate::registry::ProviderRegistry;

/// Errors returned by [`Resolver::resolve`].
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("malformed identifier: {0}")]
    Malformed(#[from] IdentifierError),
    #[error("no provider holds {0}")]
    NotFound(Identifier),
}

/// Cache-fronted fan-out over the available item providers.
///
/// Constructed once and shared (typically as `Arc<Resolver>`) by every
/// caller. Construction is the init step; [`Resolver::shutdown`] is the
/// matching teardown.
pub struct Resolver {
    registry: ProviderRegistry,
    cache: ResolutionCache,
    default_namespace: String,
    provider_timeout: Duration,
}

impl Resolver {
    /// Validate `config`, probe `candidates` against `host` and build a
    /// resolver.
    pub fn new(
        config: &ResolverConfig,
        candidates: Vec<Arc<dyn ItemProvider>>,
        host: &dyn PluginHost,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(config, candidates, host, Arc::new(SystemClock))
    }

    /// Like [`Resolver::new`], with an explicit clock for cache expiry.
    pub fn with_clock(
        config: &ResolverConfig,
        candidates: Vec<Arc<dyn ItemProvider>>,
        host: &dyn PluginHost,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = ProviderRegistry::initialize(candidates, host, config);
        let policy = CachePolicy {
            capacity: config.capacity(),
            positive_ttl: config.positive_ttl(),
            negative_ttl: config.negative_ttl(),
        };
        Self::from_parts(config, registry, ResolutionCache::with_clock(policy, clock))
    }

    /// Assemble a resolver from an existing registry and cache.
    pub fn from_parts(
        config: &ResolverConfig,
        registry: ProviderRegistry,
        cache: ResolutionCache,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(
            providers = registry.len(),
            capacity = cache.capacity().get(),
            default_namespace = %config.default_namespace(),
            "item resolver ready"
        );
        Ok(Self {
            registry,
            cache,
            default_namespace: config.default_namespace(),
            provider_timeout: config.provider_timeout(),
        })
    }

    /// Normalize a raw id with the configured default namespace.
    pub fn parse(&self, raw: &str) -> Result<Identifier, IdentifierError> {
        Identifier::parse(raw, &self.default_namespace)
    }

    /// Resolve a raw id to an item.
    pub async fn resolve(&self, raw: &str) -> Result<Arc<ResolvedItem>, ResolveError> {
        let id = self.parse(raw)?;
        self.resolve_identifier(&id).await
    }

    /// Resolve an already normalized identifier.
    pub async fn resolve_identifier(
        &self,
        id: &Identifier,
    ) -> Result<Arc<ResolvedItem>, ResolveError> {
        match self.cache.get(id) {
            CacheLookup::Hit(item) => return Ok(item),
            CacheLookup::NegativeHit => {
                tracing::trace!(identifier = %id, "negative cache hit");
                return Err(ResolveError::NotFound(id.clone()));
            }
            CacheLookup::Miss => {}
        }

        for provider in self.candidates(id) {
            let lookup_id = id.clone();
            let outcome = self
                .guarded(provider, move |p| p.try_resolve(&lookup_id))
                .await;

            match outcome {
                Ok(Some(item)) => {
                    let item = Arc::new(item);
                    self.cache.put(id.clone(), Arc::clone(&item));
                    tracing::debug!(
                        identifier = %id,
                        provider = %item.provider,
                        "resolved item"
                    );
                    return Ok(item);
                }
                Ok(None) => {
                    tracing::trace!(identifier = %id, provider = provider.name(), "provider miss");
                }
                Err(e) => {
                    tracing::warn!(
                        identifier = %id,
                        error = %e,
                        "provider lookup failed, trying next provider"
                    );
                }
            }
        }

        self.cache.put_negative(id.clone());
        tracing::debug!(identifier = %id, "item not found in any provider");
        Err(ResolveError::NotFound(id.clone()))
    }

    /// Resolve several raw ids concurrently. Results keep input order.
    pub async fn resolve_many<S: AsRef<str>>(
        &self,
        raws: &[S],
    ) -> Vec<Result<Arc<ResolvedItem>, ResolveError>> {
        join_all(raws.iter().map(|raw| self.resolve(raw.as_ref()))).await
    }

    /// Whether `raw` names an item some provider holds.
    pub async fn exists(&self, raw: &str) -> bool {
        self.resolve(raw).await.is_ok()
    }

    /// Reverse lookup: ask providers, in order, which item `item` is.
    ///
    /// Not cached; handles carry no stable identity to key on.
    pub async fn identify(&self, item: &ItemHandle) -> Option<Identifier> {
        for provider in self.registry.ordered() {
            let handle = item.clone();
            match self.guarded(provider, move |p| p.identify(&handle)).await {
                Ok(Some(id)) => return Some(id),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "provider reverse lookup failed, trying next provider");
                }
            }
        }
        None
    }

    /// Drop the cached result for one id.
    pub fn invalidate(&self, raw: &str) -> Result<bool, IdentifierError> {
        let id = self.parse(raw)?;
        Ok(self.cache.invalidate(&id))
    }

    /// Drop every cached result, e.g. after a provider reloaded its items.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }

    /// Release cached items ahead of host shutdown.
    pub fn shutdown(&self) {
        let cached = self.cache.len();
        self.cache.clear();
        tracing::info!(cached, "item resolver shut down");
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Providers that serve `id`'s namespace, in registry order.
    ///
    /// Ids in the default namespace go to every provider; other
    /// namespaces only reach providers that claim them, plus providers
    /// that claim none. With the default namespace `minecraft`, an
    /// explicit `minecraft:stone` is therefore offered to the custom
    /// providers before Vanilla, so a custom item keyed `stone` shadows
    /// the vanilla material. Qualify ids with the plugin namespace, or
    /// configure another default namespace, to avoid that.
    fn candidates<'a>(
        &'a self,
        id: &'a Identifier,
    ) -> impl Iterator<Item = &'a Arc<dyn ItemProvider>> + 'a {
        let open = id.is_in(&self.default_namespace);
        self.registry.ordered().iter().filter(move |p| {
            let namespaces = p.namespaces();
            open || namespaces.is_empty() || namespaces.iter().any(|ns| id.is_in(ns))
        })
    }

    /// Run one provider call on the blocking pool, bounded by the
    /// provider timeout. Panics and overruns become provider errors.
    async fn guarded<T, F>(&self, provider: &Arc<dyn ItemProvider>, call: F) -> Result<T, ProviderError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ItemProvider) -> Result<T, ProviderError> + Send + 'static,
    {
        let name = provider.name().to_string();
        let provider = Arc::clone(provider);
        let task = tokio::task::spawn_blocking(move || call(&*provider));

        match tokio::time::timeout(self.provider_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(_join)) => Err(ProviderError::Panicked { provider: name }),
            Err(_elapsed) => Err(ProviderError::TimedOut {
                provider: name,
                timeout: self.provider_timeout,
            }),
        }
    }
}
