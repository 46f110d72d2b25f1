//! Nexo adapter.
//!
//! Nexo succeeded Oraxen and still answers for `oraxen:` ids, so servers
//! that migrated keep their old configuration working.

use std::sync::Arc;

use super::{ApiFault, ItemHandle, ItemProvider, PluginHost, ProviderError, ResolvedItem};
use super::{lookup_registered, qualify};
use crate::identifier::Identifier;

pub const PLUGIN_NAME: &str = "Nexo";
pub const NAMESPACES: &[&str] = &["nexo", "oraxen"];
pub const DEFAULT_PRIORITY: i32 = 20;

/// The slice of Nexo's `NexoItems` API the adapter relies on.
pub trait NexoItemsApi: Send + Sync {
    /// `NexoItems.exists(id)`.
    fn exists(&self, id: &str) -> Result<bool, ApiFault>;

    /// `NexoItems.itemFromId(id).build()`.
    fn item_from_id(&self, id: &str) -> Result<Option<ItemHandle>, ApiFault>;

    /// `NexoItems.idFromItem(item)`.
    fn id_from_item(&self, item: &ItemHandle) -> Option<String>;
}

pub struct NexoProvider {
    api: Arc<dyn NexoItemsApi>,
}

impl NexoProvider {
    pub fn new(api: Arc<dyn NexoItemsApi>) -> Self {
        Self { api }
    }
}

impl ItemProvider for NexoProvider {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn default_priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    fn namespaces(&self) -> &[&'static str] {
        NAMESPACES
    }

    fn is_available(&self, host: &dyn PluginHost) -> bool {
        host.is_plugin_present(PLUGIN_NAME)
    }

    fn try_resolve(&self, id: &Identifier) -> Result<Option<ResolvedItem>, ProviderError> {
        lookup_registered(PLUGIN_NAME, id, self.api.exists(id.key()), || {
            self.api.item_from_id(id.key())
        })
    }

    fn identify(&self, item: &ItemHandle) -> Result<Option<Identifier>, ProviderError> {
        self.api
            .id_from_item(item)
            .map(|native| qualify(PLUGIN_NAME, NAMESPACES[0], &native))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{StaticCatalog, StaticHost};

    struct Unloaded;

    impl NexoItemsApi for Unloaded {
        fn exists(&self, _id: &str) -> Result<bool, ApiFault> {
            Err(ApiFault("items not loaded yet".into()))
        }
        fn item_from_id(&self, _id: &str) -> Result<Option<ItemHandle>, ApiFault> {
            Err(ApiFault("items not loaded yet".into()))
        }
        fn id_from_item(&self, _item: &ItemHandle) -> Option<String> {
            None
        }
    }

    fn provider() -> NexoProvider {
        NexoProvider::new(Arc::new(
            StaticCatalog::new("nexo").with_items(["obsidian_blade", "amethyst"]),
        ))
    }

    #[test]
    fn answers_for_legacy_oraxen_namespace() {
        let p = provider();
        assert!(p.namespaces().contains(&"oraxen"));
        let id = Identifier::parse("oraxen:amethyst", "minecraft").unwrap();
        let item = p.try_resolve(&id).unwrap().unwrap();
        assert_eq!(item.provider, "Nexo");
    }

    #[test]
    fn availability_follows_host() {
        let p = provider();
        assert!(p.is_available(&StaticHost::new(["Nexo"])));
        assert!(!p.is_available(&StaticHost::default()));
    }

    #[test]
    fn miss_and_fault_are_distinct() {
        let id = Identifier::parse("nexo:unknown", "minecraft").unwrap();
        assert!(provider().try_resolve(&id).unwrap().is_none());

        let err = NexoProvider::new(Arc::new(Unloaded))
            .try_resolve(&id)
            .unwrap_err();
        assert_eq!(err.to_string(), "Nexo: items not loaded yet");
    }

    #[test]
    fn identify_uses_nexo_namespace() {
        let p = provider();
        let id = Identifier::parse("oraxen:amethyst", "minecraft").unwrap();
        let item = p.try_resolve(&id).unwrap().unwrap();
        assert_eq!(
            p.identify(&item.payload).unwrap().unwrap().to_string(),
            "nexo:amethyst"
        );
    }
}
