//! Provider registry — the fixed, ordered set of usable providers.
//!
//! Built once at startup: every candidate is probed for availability
//! exactly once, unavailable ones are dropped, and the rest are sorted
//! by descending priority. Ties keep registration order, so the same
//! set of installed plugins always resolves in the same order.
//!
//! The result is read-only afterwards and needs no locking.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::provider::{ItemProvider, PluginHost};

/// Probe result for one candidate provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub name: String,
    /// Effective priority (configured override or adapter default).
    pub priority: i32,
    pub available: bool,
}

pub struct ProviderRegistry {
    ordered: Vec<Arc<dyn ItemProvider>>,
    descriptors: Vec<ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Probe `candidates` against `host` and order the available ones.
    ///
    /// An empty result is valid: a server may run without any item
    /// plugin installed.
    pub fn initialize(
        candidates: Vec<Arc<dyn ItemProvider>>,
        host: &dyn PluginHost,
        config: &ResolverConfig,
    ) -> Self {
        let mut available = Vec::new();
        let mut unavailable = Vec::new();

        for provider in candidates {
            let descriptor = ProviderDescriptor {
                name: provider.name().to_string(),
                priority: config
                    .priority_for(provider.name())
                    .unwrap_or_else(|| provider.default_priority()),
                available: provider.is_available(host),
            };
            tracing::info!(
                provider = %descriptor.name,
                priority = descriptor.priority,
                available = descriptor.available,
                "probed item provider"
            );
            if descriptor.available {
                available.push((descriptor, provider));
            } else {
                unavailable.push(descriptor);
            }
        }

        // Stable: equal priorities keep registration order.
        available.sort_by_key(|(descriptor, _)| Reverse(descriptor.priority));

        if available.is_empty() {
            tracing::info!("no item providers available; every lookup will miss");
        }

        let (mut descriptors, ordered): (Vec<_>, Vec<_>) = available.into_iter().unzip();
        descriptors.extend(unavailable);

        Self {
            ordered,
            descriptors,
        }
    }

    /// Available providers in resolution order.
    pub fn ordered(&self) -> &[Arc<dyn ItemProvider>] {
        &self.ordered
    }

    /// Every probed candidate: available ones in resolution order, then
    /// unavailable ones in registration order.
    pub fn descriptors(&self) -> &[ProviderDescriptor] {
        &self.descriptors
    }

    /// Look up an available provider by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Arc<dyn ItemProvider>> {
        self.ordered
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
