//! Fixture files — a simulated host for dry runs.
//!
//! Lists the plugins "installed" on the host and the item keys each
//! provider holds, so priorities and namespace routing can be checked
//! without a running server.
//!
//! ```toml
//! plugins = ["Nexo", "ItemsAdder"]
//!
//! [items]
//! nexo = ["ruby_gem", "obsidian_blade"]
//! itemsadder = ["ruby_gem"]
//! minecraft = ["stone", "diamond_axe"]
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use itemresolve::ItemProvider;
use itemresolve::provider::{
    ItemsAdderProvider, NexoProvider, OraxenProvider, StaticCatalog, StaticHost, VanillaProvider,
};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid fixture: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fixture {
    /// Plugin names reported as present by the simulated host.
    pub plugins: Vec<String>,
    pub items: FixtureItems,
}

/// Item keys per provider catalog.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureItems {
    pub itemsadder: Vec<String>,
    pub nexo: Vec<String>,
    pub oraxen: Vec<String>,
    pub minecraft: Vec<String>,
}

impl Fixture {
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, FixtureError> {
        Ok(toml::from_str(text)?)
    }

    pub fn host(&self) -> StaticHost {
        StaticHost::new(&self.plugins)
    }

    /// One adapter per provider, each over its own catalog.
    pub fn candidates(&self) -> Vec<Arc<dyn ItemProvider>> {
        let items = &self.items;
        vec![
            Arc::new(ItemsAdderProvider::new(Arc::new(
                StaticCatalog::new("itemsadder").with_items(&items.itemsadder),
            ))),
            Arc::new(NexoProvider::new(Arc::new(
                StaticCatalog::new("nexo").with_items(&items.nexo),
            ))),
            Arc::new(OraxenProvider::new(Arc::new(
                StaticCatalog::new("oraxen").with_items(&items.oraxen),
            ))),
            Arc::new(VanillaProvider::new(Arc::new(
                StaticCatalog::new("minecraft").with_items(&items.minecraft),
            ))),
        ]
    }
}
