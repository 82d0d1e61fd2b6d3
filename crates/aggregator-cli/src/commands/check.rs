use aggregator_core::{build_client, AggregatorConfig, ClientPolicy};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    workers: usize,
    folder: &'a str,
    web: &'a str,
    domain: &'a str,
    aggregator: &'a str,
    key_configured: bool,
    providers: Vec<ProviderReport<'a>>,
}

#[derive(Debug, Serialize)]
struct ProviderReport<'a> {
    name: &'a str,
    domain: &'a str,
    insecure: bool,
    rate: Option<f64>,
}

pub fn run(config: &AggregatorConfig) -> Result<Value, CliError> {
    let mut providers = Vec::with_capacity(config.providers.len());
    for provider in &config.providers {
        // Building proves the transport and limiter can be set up.
        build_client(config, provider).map_err(|source| CliError::Client {
            provider: provider.name.clone(),
            source,
        })?;

        let policy = ClientPolicy::resolve(config, provider);
        providers.push(ProviderReport {
            name: &provider.name,
            domain: &provider.domain,
            insecure: policy.insecure,
            rate: policy.rate,
        });
    }

    let report = CheckReport {
        workers: config.worker_count(),
        folder: &config.folder,
        web: &config.web,
        domain: &config.domain,
        aggregator: &config.aggregator.name,
        key_configured: config.key_path().is_some(),
        providers,
    };
    Ok(serde_json::to_value(report)?)
}
