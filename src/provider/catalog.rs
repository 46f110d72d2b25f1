//! In-memory item catalog.
//!
//! Implements every provider's native API over a fixed set of keys.
//! Backs CLI fixtures and dry runs where no real item plugin is
//! loaded.

use std::collections::HashMap;

use super::{ApiFault, ItemHandle};
use super::{CustomStackApi, MaterialApi, NexoItemsApi, OraxenItemsApi};

/// Payload handed out by a [`StaticCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Name of the catalog that created the item.
    pub origin: String,
    pub key: String,
}

/// A fixed table of item keys, each backed by one shared handle.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    origin: String,
    items: HashMap<String, ItemHandle>,
}

impl StaticCatalog {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            items: HashMap::new(),
        }
    }

    /// Add keys to the catalog. Keys are stored lower-cased.
    pub fn with_items<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref().trim().to_lowercase();
            let item = CatalogItem {
                origin: self.origin.clone(),
                key: key.clone(),
            };
            self.items.insert(key, ItemHandle::new(item));
        }
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get(&self, key: &str) -> Option<ItemHandle> {
        self.items.get(key).cloned()
    }

    fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Key of `item` if this catalog created it.
    fn key_of(&self, item: &ItemHandle) -> Option<String> {
        item.downcast_ref::<CatalogItem>()
            .filter(|c| c.origin == self.origin)
            .map(|c| c.key.clone())
    }
}

impl CustomStackApi for StaticCatalog {
    fn is_in_registry(&self, id: &str) -> Result<bool, ApiFault> {
        Ok(self.contains(id))
    }

    fn get_instance(&self, id: &str) -> Result<Option<ItemHandle>, ApiFault> {
        Ok(self.get(id))
    }

    fn by_item_stack(&self, item: &ItemHandle) -> Option<String> {
        self.key_of(item)
    }
}

impl NexoItemsApi for StaticCatalog {
    fn exists(&self, id: &str) -> Result<bool, ApiFault> {
        Ok(self.contains(id))
    }

    fn item_from_id(&self, id: &str) -> Result<Option<ItemHandle>, ApiFault> {
        Ok(self.get(id))
    }

    fn id_from_item(&self, item: &ItemHandle) -> Option<String> {
        self.key_of(item)
    }
}

impl OraxenItemsApi for StaticCatalog {
    fn exists(&self, id: &str) -> Result<bool, ApiFault> {
        Ok(self.contains(id))
    }

    fn get_item_by_id(&self, id: &str) -> Result<Option<ItemHandle>, ApiFault> {
        Ok(self.get(id))
    }

    fn get_id_by_item(&self, item: &ItemHandle) -> Option<String> {
        self.key_of(item)
    }
}

impl MaterialApi for StaticCatalog {
    fn match_material(&self, key: &str) -> Option<ItemHandle> {
        self.get(key)
    }

    fn material_key(&self, item: &ItemHandle) -> Option<String> {
        self.key_of(item).map(|key| format!("{}:{key}", self.origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_normalized() {
        let catalog = StaticCatalog::new("nexo").with_items([" Ruby_Gem ", "amethyst"]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.is_in_registry("ruby_gem").unwrap());
        assert!(!catalog.is_in_registry("Ruby_Gem").unwrap());
    }

    #[test]
    fn lookups_share_one_handle_per_key() {
        let catalog = StaticCatalog::new("oraxen").with_items(["amethyst"]);
        let a = catalog.get_item_by_id("amethyst").unwrap().unwrap();
        let b = catalog.get_item_by_id("amethyst").unwrap().unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(
            a.downcast_ref::<CatalogItem>().map(|c| c.key.as_str()),
            Some("amethyst")
        );
    }

    #[test]
    fn reverse_lookup_only_for_own_items() {
        let nexo = StaticCatalog::new("nexo").with_items(["gem"]);
        let oraxen = StaticCatalog::new("oraxen").with_items(["gem"]);
        let item = nexo.item_from_id("gem").unwrap().unwrap();
        assert_eq!(nexo.id_from_item(&item).as_deref(), Some("gem"));
        assert_eq!(oraxen.get_id_by_item(&item), None);
    }

    #[test]
    fn material_keys_are_qualified() {
        let vanilla = StaticCatalog::new("minecraft").with_items(["stone"]);
        let item = vanilla.match_material("stone").unwrap();
        assert_eq!(vanilla.material_key(&item).as_deref(), Some("minecraft:stone"));
    }
}
