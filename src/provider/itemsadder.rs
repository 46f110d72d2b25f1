//! ItemsAdder adapter.

use std::sync::Arc;

use super::{ApiFault, ItemHandle, ItemProvider, PluginHost, ProviderError, ResolvedItem};
use super::{lookup_registered, qualify};
use crate::identifier::Identifier;

pub const PLUGIN_NAME: &str = "ItemsAdder";
pub const NAMESPACES: &[&str] = &["itemsadder"];
pub const DEFAULT_PRIORITY: i32 = 10;

/// The slice of ItemsAdder's `CustomStack` API the adapter relies on.
pub trait CustomStackApi: Send + Sync {
    /// `CustomStack.isInRegistry(id)`.
    fn is_in_registry(&self, id: &str) -> Result<bool, ApiFault>;

    /// `CustomStack.getInstance(id).getItemStack()`.
    fn get_instance(&self, id: &str) -> Result<Option<ItemHandle>, ApiFault>;

    /// `CustomStack.byItemStack(item).getId()`.
    fn by_item_stack(&self, item: &ItemHandle) -> Option<String>;
}

pub struct ItemsAdderProvider {
    api: Arc<dyn CustomStackApi>,
}

impl ItemsAdderProvider {
    pub fn new(api: Arc<dyn CustomStackApi>) -> Self {
        Self { api }
    }
}

impl ItemProvider for ItemsAdderProvider {
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
        lookup_registered(PLUGIN_NAME, id, self.api.is_in_registry(id.key()), || {
            self.api.get_instance(id.key())
        })
    }

    fn identify(&self, item: &ItemHandle) -> Result<Option<Identifier>, ProviderError> {
        self.api
            .by_item_stack(item)
            .map(|native| qualify(PLUGIN_NAME, NAMESPACES[0], &native))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{StaticCatalog, StaticHost};

    /// Registry claims every id but never builds one.
    struct HollowRegistry;

    impl CustomStackApi for HollowRegistry {
        fn is_in_registry(&self, _id: &str) -> Result<bool, ApiFault> {
            Ok(true)
        }
        fn get_instance(&self, _id: &str) -> Result<Option<ItemHandle>, ApiFault> {
            Ok(None)
        }
        fn by_item_stack(&self, _item: &ItemHandle) -> Option<String> {
            None
        }
    }

    fn provider() -> (ItemsAdderProvider, Arc<StaticCatalog>) {
        let catalog = Arc::new(StaticCatalog::new("itemsadder").with_items(["ruby_gem"]));
        (ItemsAdderProvider::new(catalog.clone()), catalog)
    }

    #[test]
    fn availability_follows_host() {
        let (p, _) = provider();
        assert!(p.is_available(&StaticHost::new(["ItemsAdder"])));
        assert!(!p.is_available(&StaticHost::new(["Nexo"])));
    }

    #[test]
    fn resolves_by_stripped_key() {
        let (p, _) = provider();
        let id = Identifier::parse("itemsadder:ruby_gem", "minecraft").unwrap();
        let item = p.try_resolve(&id).unwrap().unwrap();
        assert_eq!(item.provider, "ItemsAdder");
        assert_eq!(item.identifier, id);
    }

    #[test]
    fn unknown_key_is_a_miss() {
        let (p, _) = provider();
        let id = Identifier::parse("itemsadder:sapphire", "minecraft").unwrap();
        assert!(p.try_resolve(&id).unwrap().is_none());
    }

    #[test]
    fn hollow_registry_is_an_error() {
        let p = ItemsAdderProvider::new(Arc::new(HollowRegistry));
        let id = Identifier::parse("itemsadder:ruby_gem", "minecraft").unwrap();
        assert!(matches!(p.try_resolve(&id), Err(ProviderError::Api { .. })));
    }

    #[test]
    fn identify_qualifies_with_itemsadder_namespace() {
        let (p, _) = provider();
        let id = Identifier::parse("ruby_gem", "minecraft").unwrap();
        let item = p.try_resolve(&id).unwrap().unwrap();
        let found = p.identify(&item.payload).unwrap().unwrap();
        assert_eq!(found.to_string(), "itemsadder:ruby_gem");
    }
}
