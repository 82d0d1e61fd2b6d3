//! # Aggregator Core
//!
//! Loads the aggregator settings and prepares what the fetch pipeline needs
//! for every provider before any fetching starts.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Settings document, providers, `load_config` entry point |
//! | [`defaults`] | Constant fallbacks and worker-count sizing |
//! | [`validation`] | Structural and semantic checks |
//! | [`metadata`] | The `[aggregator]` descriptive block |
//! | [`key_cache`] | Memoized, thread-safe signing key loader |
//! | [`client_factory`] | Per-provider HTTP clients |
//! | [`http_client`] | HTTP client abstraction |
//! | [`throttling`] | Token-bucket rate limiting |
//! | [`overrides`] | Provider-over-global layering |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aggregator_core::{build_client, load_config};
//!
//! let config = load_config(None)?; // reads ./aggregator.toml
//! for provider in &config.providers {
//!     let client = build_client(&config, provider)?;
//!     // hand `client` to a fetch worker
//! }
//! let key = config.crypto_key()?; // None when no key is configured
//! ```
//!
//! ## Layering
//!
//! ```text
//! provider override ──▶ global setting ──▶ safe default
//!   insecure = true       insecure = true     verify certificates
//!   rate = 5.0            rate = 1.0          no rate limiting
//! ```

pub mod client_factory;
pub mod config;
pub mod defaults;
pub mod error;
pub mod http_client;
pub mod key_cache;
pub mod metadata;
pub mod overrides;
pub mod throttling;
pub mod validation;

pub use client_factory::{build_client, ClientPolicy, ProviderClient};
pub use config::{
    load_config, load_config_from_str, AggregatorConfig, ProviderSpec, DEFAULT_CONFIG_PATH,
};
pub use defaults::{available_parallelism, resolve_defaults};
pub use error::{ClientBuildError, ConfigError, KeyLoadError, LoadError};
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use key_cache::{ArmoredKey, ArmoredKeyParser, KeyCache, KeyParser};
pub use metadata::{AggregatorCategory, AggregatorInfo, MetadataError};
pub use throttling::RateLimitedClient;
pub use validation::validate;
