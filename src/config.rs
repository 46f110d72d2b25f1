//! Resolver configuration.
//!
//! Loaded once, before the provider registry is built. All fields have
//! defaults so an empty file (or no file) is a valid configuration.
//!
//! ```toml
//! default_namespace = "minecraft"
//! cache_capacity = 1024
//! positive_ttl_secs = 600   # 0 = never expire
//! negative_ttl_secs = 60
//! provider_timeout_ms = 250
//!
//! [priorities]
//! Nexo = 40
//! ```

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::identifier::Identifier;

/// Configuration load/validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Namespace applied to bare ids.
    pub default_namespace: String,
    /// Maximum number of cached identifiers (positive and negative).
    pub cache_capacity: usize,
    /// Lifetime of a found item. `0` keeps entries until evicted.
    pub positive_ttl_secs: u64,
    /// Lifetime of a "not found" marker.
    pub negative_ttl_secs: u64,
    /// Upper bound on a single provider lookup.
    pub provider_timeout_ms: u64,
    /// Priority overrides keyed by provider name (case-insensitive).
    pub priorities: HashMap<String, i32>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_namespace: "minecraft".to_string(),
            cache_capacity: 1024,
            positive_ttl_secs: 600,
            negative_ttl_secs: 60,
            provider_timeout_ms: 250,
            priorities: HashMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Read and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Identifier::new(&self.default_namespace, "probe").map_err(|e| {
            ConfigError::Invalid(format!(
                "default_namespace {:?}: {e}",
                self.default_namespace
            ))
        })?;
        if self.cache_capacity == 0 {
            return Err(ConfigError::Invalid("cache_capacity must be >= 1".into()));
        }
        if self.negative_ttl_secs == 0 {
            return Err(ConfigError::Invalid("negative_ttl_secs must be >= 1".into()));
        }
        if self.provider_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "provider_timeout_ms must be >= 1".into(),
            ));
        }
        let mut names: Vec<&String> = self.priorities.keys().collect();
        names.sort();
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "priority for {name:?} is set more than once (names are case-insensitive)"
                )));
            }
        }
        if self.positive_ttl_secs != 0 && self.negative_ttl_secs > self.positive_ttl_secs {
            tracing::warn!(
                positive_ttl_secs = self.positive_ttl_secs,
                negative_ttl_secs = self.negative_ttl_secs,
                "negative entries outlive positive ones"
            );
        }
        Ok(())
    }

    /// Normalized default namespace.
    pub fn default_namespace(&self) -> String {
        self.default_namespace.trim().to_lowercase()
    }

    /// Cache capacity, clamped to at least one entry.
    pub fn capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache_capacity).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn positive_ttl(&self) -> Option<Duration> {
        match self.positive_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn negative_ttl(&self) -> Duration {
        Duration::from_secs(self.negative_ttl_secs)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Configured priority override for a provider, if any.
    pub fn priority_for(&self, provider: &str) -> Option<i32> {
        self.priorities
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(provider))
            .map(|(_, priority)| *priority)
    }
}
