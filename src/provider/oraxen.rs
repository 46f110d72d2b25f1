//! Oraxen adapter.

use std::sync::Arc;

use super::{ApiFault, ItemHandle, ItemProvider, PluginHost, ProviderError, ResolvedItem};
use super::{lookup_registered, qualify};
use crate::identifier::Identifier;

pub const PLUGIN_NAME: &str = "Oraxen";
pub const NAMESPACES: &[&str] = &["oraxen"];
pub const DEFAULT_PRIORITY: i32 = 30;

/// The slice of Oraxen's `OraxenItems` API the adapter relies on.
pub trait OraxenItemsApi: Send + Sync {
    /// `OraxenItems.exists(id)`.
    fn exists(&self, id: &str) -> Result<bool, ApiFault>;

    /// `OraxenItems.getItemById(id).build()`.
    fn get_item_by_id(&self, id: &str) -> Result<Option<ItemHandle>, ApiFault>;

    /// `OraxenItems.getIdByItem(item)`.
    fn get_id_by_item(&self, item: &ItemHandle) -> Option<String>;
}

pub struct OraxenProvider {
    api: Arc<dyn OraxenItemsApi>,
}

impl OraxenProvider {
    pub fn new(api: Arc<dyn OraxenItemsApi>) -> Self {
        Self { api }
    }
}

impl ItemProvider for OraxenProvider {
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
            self.api.get_item_by_id(id.key())
        })
    }

    fn identify(&self, item: &ItemHandle) -> Result<Option<Identifier>, ProviderError> {
        self.api
            .get_id_by_item(item)
            .map(|native| qualify(PLUGIN_NAME, NAMESPACES[0], &native))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticCatalog;

    #[test]
    fn resolves_and_identifies() {
        let catalog = Arc::new(StaticCatalog::new("oraxen").with_items(["amethyst"]));
        let p = OraxenProvider::new(catalog);
        let id = Identifier::parse("Oraxen:Amethyst", "minecraft").unwrap();

        let item = p.try_resolve(&id).unwrap().unwrap();
        assert_eq!(item.provider, "Oraxen");
        assert_eq!(
            p.identify(&item.payload).unwrap(),
            Some(Identifier::new("oraxen", "amethyst").unwrap())
        );
    }

    #[test]
    fn foreign_handles_are_not_identified() {
        let p = OraxenProvider::new(Arc::new(StaticCatalog::new("oraxen")));
        assert_eq!(p.identify(&ItemHandle::new(1u8)).unwrap(), None);
    }
}
