//! Settings document, its providers, and the single load entry point.

use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::defaults::{available_parallelism, resolve_defaults};
use crate::error::{KeyLoadError, LoadError};
use crate::key_cache::{ArmoredKey, KeyCache};
use crate::metadata::AggregatorInfo;
use crate::validation::validate;

/// Used when the caller does not name a settings file.
pub const DEFAULT_CONFIG_PATH: &str = "aggregator.toml";

/// One remote source and its optional overrides of the global settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    /// Requests per second for this provider only.
    #[serde(default)]
    pub rate: Option<f64>,
    /// `Some(true)` disables certificate verification for this provider.
    #[serde(default)]
    pub insecure: Option<bool>,
}

impl ProviderSpec {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            rate: None,
            insecure: None,
        }
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = Some(insecure);
        self
    }
}

/// The whole aggregator configuration.
///
/// Only [`load_config`] and [`load_config_from_str`] hand out instances that
/// are defaulted and validated; after that the value is read-only apart from
/// the internal key cache.
#[derive(Default, Deserialize)]
pub struct AggregatorConfig {
    /// Fetch workers; non-positive means "derive from the hardware".
    #[serde(default)]
    pub workers: i64,
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub web: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub insecure: Option<bool>,
    #[serde(default)]
    pub aggregator: AggregatorInfo,
    #[serde(default)]
    pub providers: Vec<ProviderSpec>,
    /// Armored OpenPGP key file.
    #[serde(default)]
    pub key: Option<PathBuf>,
    #[serde(default)]
    pub passphrase: Option<String>,

    #[serde(skip)]
    key_cache: KeyCache,
}

impl AggregatorConfig {
    /// Resolved worker count, `0` only before defaults are applied.
    pub fn worker_count(&self) -> usize {
        usize::try_from(self.workers).unwrap_or(0)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderSpec> {
        self.providers.iter().find(|provider| provider.name == name)
    }

    /// Key file the cache will read; an empty `key` counts as unset.
    pub fn key_path(&self) -> Option<&Path> {
        self.key_cache.path()
    }

    /// The signing key, read from disk on first use and memoized afterwards.
    ///
    /// Safe to call from every fetch worker at once.
    pub fn crypto_key(&self) -> Result<Option<Arc<ArmoredKey>>, KeyLoadError> {
        self.key_cache.get()
    }

    fn attach_key_cache(&mut self) {
        self.key_cache = KeyCache::new(self.key.clone());
    }
}

impl Debug for AggregatorConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregatorConfig")
            .field("workers", &self.workers)
            .field("folder", &self.folder)
            .field("web", &self.web)
            .field("domain", &self.domain)
            .field("rate", &self.rate)
            .field("insecure", &self.insecure)
            .field("aggregator", &self.aggregator)
            .field("providers", &self.providers)
            .field("key", &self.key)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("key_cache", &self.key_cache)
            .finish()
    }
}

/// Reads, defaults and validates the settings file.
///
/// `None` or an empty path falls back to [`DEFAULT_CONFIG_PATH`].
pub fn load_config(path: Option<&Path>) -> Result<AggregatorConfig, LoadError> {
    let path = path
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = load_config_from_str(&raw, available_parallelism())?;
    info!(
        path = %path.display(),
        providers = config.providers.len(),
        workers = config.workers,
        "configuration loaded"
    );
    Ok(config)
}

/// Same as [`load_config`] for an in-memory document and a given parallelism.
pub fn load_config_from_str(raw: &str, parallelism: usize) -> Result<AggregatorConfig, LoadError> {
    let mut config: AggregatorConfig = toml::from_str(raw)?;
    resolve_defaults(&mut config, parallelism);
    validate(&config)?;
    config.attach_key_cache();
    Ok(config)
}
