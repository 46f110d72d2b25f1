//! Vanilla material adapter.
//!
//! Plain game materials need no plugin, so this provider is always
//! available and by default sits behind every custom item plugin.

use std::sync::Arc;

use super::{ItemHandle, ItemProvider, PluginHost, ProviderError, ResolvedItem};
use crate::identifier::Identifier;

pub const PROVIDER_NAME: &str = "Vanilla";
pub const NAMESPACES: &[&str] = &["minecraft"];
pub const DEFAULT_PRIORITY: i32 = 0;

/// Host material table.
pub trait MaterialApi: Send + Sync {
    /// `Material.matchMaterial(key)` turned into a single-item stack.
    fn match_material(&self, key: &str) -> Option<ItemHandle>;

    /// Namespaced material key of an item (`minecraft:stone`).
    fn material_key(&self, item: &ItemHandle) -> Option<String>;
}

pub struct VanillaProvider {
    api: Arc<dyn MaterialApi>,
}

impl VanillaProvider {
    pub fn new(api: Arc<dyn MaterialApi>) -> Self {
        Self { api }
    }
}

impl ItemProvider for VanillaProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn default_priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    fn namespaces(&self) -> &[&'static str] {
        NAMESPACES
    }

    fn is_available(&self, _host: &dyn PluginHost) -> bool {
        true
    }

    fn try_resolve(&self, id: &Identifier) -> Result<Option<ResolvedItem>, ProviderError> {
        Ok(self
            .api
            .match_material(id.key())
            .map(|payload| ResolvedItem::new(id.clone(), PROVIDER_NAME, payload)))
    }

    fn identify(&self, item: &ItemHandle) -> Result<Option<Identifier>, ProviderError> {
        let Some(key) = self.api.material_key(item) else {
            return Ok(None);
        };
        Identifier::parse(&key, NAMESPACES[0])
            .map(Some)
            .map_err(|e| ProviderError::api(PROVIDER_NAME, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{StaticCatalog, StaticHost};

    fn provider() -> VanillaProvider {
        VanillaProvider::new(Arc::new(
            StaticCatalog::new("minecraft").with_items(["stone", "diamond_axe"]),
        ))
    }

    #[test]
    fn always_available() {
        assert!(provider().is_available(&StaticHost::default()));
    }

    #[test]
    fn resolves_materials() {
        let id = Identifier::parse("stone", "minecraft").unwrap();
        let item = provider().try_resolve(&id).unwrap().unwrap();
        assert_eq!(item.provider, "Vanilla");

        let missing = Identifier::parse("ruby_gem", "minecraft").unwrap();
        assert!(provider().try_resolve(&missing).unwrap().is_none());
    }

    #[test]
    fn identify_returns_material_key() {
        let p = provider();
        let id = Identifier::parse("diamond_axe", "minecraft").unwrap();
        let item = p.try_resolve(&id).unwrap().unwrap();
        assert_eq!(p.identify(&item.payload).unwrap(), Some(id));
    }
}
