//! Custom item resolution across ItemsAdder, Nexo and Oraxen.
//!
//! A [`Resolver`] owns a [`ProviderRegistry`] (the item plugins found on
//! the host, in priority order) and a [`ResolutionCache`]. Callers hand
//! it raw ids such as `nexo:ruby_gem` or `stone` and get back the
//! provider-owned item handle, or `NotFound`.

pub mod cache;
pub mod config;
pub mod identifier;
pub mod provider;
pub mod registry;
pub mod resolver;

pub use cache::{CacheLookup, CachePolicy, Clock, ManualClock, ResolutionCache, SystemClock};
pub use config::{ConfigError, ResolverConfig};
pub use identifier::{Identifier, IdentifierError};
pub use provider::{ItemHandle, ItemProvider, PluginHost, ProviderError, ResolvedItem};
pub use registry::{ProviderDescriptor, ProviderRegistry};
pub use resolver::{ResolveError, Resolver};
