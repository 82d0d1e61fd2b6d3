use std::path::PathBuf;

use thiserror::Error;

use crate::metadata::MetadataError;

/// Structural and semantic configuration failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("no providers given")]
    NoProviders,
    #[error(transparent)]
    Aggregator(#[from] MetadataError),
    #[error("no name given for provider")]
    MissingProviderName,
    #[error("no domain given for provider")]
    MissingProviderDomain,
    #[error("provider '{name}' is configured more than once")]
    DuplicateProvider { name: String },
    #[error("{scope} rate must be a positive number of requests per second, got {rate}")]
    InvalidRate { scope: String, rate: f64 },
}

/// Failure to read or parse the configured signing key.
///
/// Cloneable so the first failure can be handed to every later caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyLoadError {
    #[error("cannot open key file {}: {message}", path.display())]
    Open { path: PathBuf, message: String },
    #[error("cannot parse armored key in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Everything that can abort [`crate::config::load_config`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure to assemble a provider client.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientBuildError {
    #[error("rate {rate} cannot drive a token bucket")]
    InvalidRate { rate: f64 },
    #[error("http transport setup failed: {0}")]
    Transport(String),
}
