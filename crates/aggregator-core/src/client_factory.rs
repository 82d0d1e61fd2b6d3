//! Per-provider HTTP clients derived from the layered settings.
//!
//! Clients are never cached: every call builds a fresh transport and, when a
//! rate applies, a fresh token bucket owned by that client alone.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::config::{AggregatorConfig, ProviderSpec};
use crate::error::ClientBuildError;
use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::overrides::{layered, layered_flag};
use crate::throttling::RateLimitedClient;

/// TLS and rate settings that apply to one provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientPolicy {
    pub insecure: bool,
    /// `None` means the client is not rate limited.
    pub rate: Option<f64>,
}

impl ClientPolicy {
    pub fn resolve(config: &AggregatorConfig, provider: &ProviderSpec) -> Self {
        let rate = (provider.rate.is_some() || config.rate.is_some())
            .then(|| layered(provider.rate, config.rate, 0.0));

        Self {
            insecure: layered_flag(provider.insecure, config.insecure),
            rate,
        }
    }
}

/// Client handed to the fetch pipeline for one provider.
#[derive(Debug)]
pub enum ProviderClient {
    Plain(ReqwestHttpClient),
    RateLimited(RateLimitedClient<ReqwestHttpClient>),
}

impl ProviderClient {
    pub fn is_insecure(&self) -> bool {
        match self {
            Self::Plain(client) => client.is_insecure(),
            Self::RateLimited(client) => client.inner().is_insecure(),
        }
    }

    pub fn rate(&self) -> Option<f64> {
        match self {
            Self::Plain(_) => None,
            Self::RateLimited(client) => Some(client.rate()),
        }
    }
}

impl HttpClient for ProviderClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        match self {
            Self::Plain(client) => client.execute(request),
            Self::RateLimited(client) => client.execute(request),
        }
    }
}

/// Builds the client `provider` should be fetched with.
pub fn build_client(
    config: &AggregatorConfig,
    provider: &ProviderSpec,
) -> Result<ProviderClient, ClientBuildError> {
    let policy = ClientPolicy::resolve(config, provider);
    let plain = ReqwestHttpClient::configured(policy.insecure)?;

    debug!(
        provider = %provider.name,
        insecure = policy.insecure,
        rate = ?policy.rate,
        "building provider client"
    );

    match policy.rate {
        None => Ok(ProviderClient::Plain(plain)),
        Some(rate) => Ok(ProviderClient::RateLimited(RateLimitedClient::new(plain, rate)?)),
    }
}
