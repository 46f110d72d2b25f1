//! Host plugin-presence query.

use std::collections::HashSet;

/// Answers whether a named plugin is installed and enabled on the host.
pub trait PluginHost: Send + Sync {
    fn is_plugin_present(&self, plugin: &str) -> bool;
}

impl<F> PluginHost for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_plugin_present(&self, plugin: &str) -> bool {
        self(plugin)
    }
}

/// A host with a fixed set of installed plugins.
///
/// Plugin names compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    plugins: HashSet<String>,
}

impl StaticHost {
    pub fn new<I, S>(plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            plugins: plugins
                .into_iter()
                .map(|p| p.as_ref().trim().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl PluginHost for StaticHost {
    fn is_plugin_present(&self, plugin: &str) -> bool {
        self.plugins.contains(&plugin.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_host_ignores_case() {
        let host = StaticHost::new(["Nexo", " itemsadder "]);
        assert!(host.is_plugin_present("nexo"));
        assert!(host.is_plugin_present("ItemsAdder"));
        assert!(!host.is_plugin_present("Oraxen"));
    }

    #[test]
    fn closures_are_hosts() {
        let host = |name: &str| name == "Oraxen";
        assert!(host.is_plugin_present("Oraxen"));
        assert!(!host.is_plugin_present("Nexo"));
    }
}
