//! Provider abstraction — one adapter per custom item plugin.
//!
//! Each installed item plugin (ItemsAdder, Nexo, Oraxen) keeps a private
//! registry of items behind its own API. Adapters translate normalized
//! [`Identifier`]s into that API and wrap hits in a [`ResolvedItem`].
//! The registry and resolver only ever see `dyn ItemProvider`.

pub mod catalog;
pub mod host;
pub mod itemsadder;
pub mod nexo;
pub mod oraxen;
pub mod vanilla;

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::identifier::{Identifier, IdentifierError};

pub use catalog::StaticCatalog;
pub use host::{PluginHost, StaticHost};
pub use itemsadder::{CustomStackApi, ItemsAdderProvider};
pub use nexo::{NexoItemsApi, NexoProvider};
pub use oraxen::{OraxenItemsApi, OraxenProvider};
pub use vanilla::{MaterialApi, VanillaProvider};

/// Errors returned by provider adapters.
///
/// None of these escape the resolver: a failing provider is logged and
/// skipped in favour of the next one.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider's own API reported a fault or inconsistent state.
    #[error("{provider}: {reason}")]
    Api { provider: String, reason: String },

    /// The lookup did not finish within the configured bound.
    #[error("{provider}: lookup exceeded {timeout:?}")]
    TimedOut { provider: String, timeout: Duration },

    /// The adapter panicked while handling the lookup.
    #[error("{provider}: lookup panicked")]
    Panicked { provider: String },
}

impl ProviderError {
    pub fn api(provider: &str, reason: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }
}

/// Fault reported by a provider's native API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ApiFault(pub String);

/// Opaque, provider-owned item handle.
///
/// The core never looks inside; callers that know the concrete type
/// recover it with [`ItemHandle::downcast_ref`].
#[derive(Clone)]
pub struct ItemHandle(Arc<dyn Any + Send + Sync>);

impl ItemHandle {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles point at the same underlying item.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemHandle(..)")
    }
}

/// A successful lookup: which provider produced which handle, and when.
#[derive(Debug, Clone)]
pub struct ResolvedItem {
    pub identifier: Identifier,
    /// Name of the owning provider.
    pub provider: String,
    pub payload: ItemHandle,
    pub resolved_at: SystemTime,
}

impl ResolvedItem {
    pub fn new(identifier: Identifier, provider: &str, payload: ItemHandle) -> Self {
        Self {
            identifier,
            provider: provider.to_string(),
            payload,
            resolved_at: SystemTime::now(),
        }
    }
}

/// Capability interface implemented once per item plugin.
///
/// `Send + Sync` is required because lookups run on blocking worker
/// threads on behalf of many concurrent callers.
pub trait ItemProvider: Send + Sync {
    /// Provider name, also the key for priority overrides.
    fn name(&self) -> &str;

    /// Priority used when configuration does not override it. Higher
    /// values are consulted first.
    fn default_priority(&self) -> i32;

    /// Namespaces this provider answers for. Empty means any namespace.
    fn namespaces(&self) -> &[&'static str] {
        &[]
    }

    /// Whether the backing plugin is installed. Probed once at registry
    /// initialization.
    fn is_available(&self, host: &dyn PluginHost) -> bool;

    /// Look up `id`. `Ok(None)` means the provider holds no such item.
    fn try_resolve(&self, id: &Identifier) -> Result<Option<ResolvedItem>, ProviderError>;

    /// Reverse lookup: the identifier of an item this provider created.
    fn identify(&self, _item: &ItemHandle) -> Result<Option<Identifier>, ProviderError> {
        Ok(None)
    }
}

/// Shared lookup flow for plugins exposing an existence check followed
/// by a builder call.
///
/// A builder that comes back empty after the existence check passed is
/// reported as an API fault rather than a miss.
pub(crate) fn lookup_registered(
    provider: &str,
    id: &Identifier,
    exists: Result<bool, ApiFault>,
    build: impl FnOnce() -> Result<Option<ItemHandle>, ApiFault>,
) -> Result<Option<ResolvedItem>, ProviderError> {
    let exists = exists.map_err(|e| ProviderError::api(provider, e.0))?;
    if !exists {
        return Ok(None);
    }

    match build().map_err(|e| ProviderError::api(provider, e.0))? {
        Some(payload) => Ok(Some(ResolvedItem::new(id.clone(), provider, payload))),
        None => Err(ProviderError::api(
            provider,
            format!("{} is registered but produced no item", id.key()),
        )),
    }
}

/// Qualify a provider-native id with `namespace` for reverse lookups.
pub(crate) fn qualify(
    provider: &str,
    namespace: &str,
    native_id: &str,
) -> Result<Identifier, ProviderError> {
    Identifier::new(namespace, native_id)
        .map_err(|e: IdentifierError| ProviderError::api(provider, e.to_string()))
}
