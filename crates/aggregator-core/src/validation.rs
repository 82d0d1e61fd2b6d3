//! Structural and semantic checks over a defaulted configuration.

use std::collections::HashSet;

use crate::config::{AggregatorConfig, ProviderSpec};
use crate::error::ConfigError;
use crate::throttling::rate_period;

/// First failure wins.
///
/// Rates are only looked at once every provider passed the name, domain and
/// uniqueness checks.
pub fn validate(config: &AggregatorConfig) -> Result<(), ConfigError> {
    if config.providers.is_empty() {
        return Err(ConfigError::NoProviders);
    }

    config.aggregator.validate()?;

    check_providers(&config.providers)?;
    check_rates(config)
}

fn check_providers(providers: &[ProviderSpec]) -> Result<(), ConfigError> {
    let mut already = HashSet::with_capacity(providers.len());

    for provider in providers {
        if provider.name.is_empty() {
            return Err(ConfigError::MissingProviderName);
        }
        if provider.domain.is_empty() {
            return Err(ConfigError::MissingProviderDomain);
        }
        if !already.insert(provider.name.as_str()) {
            return Err(ConfigError::DuplicateProvider {
                name: provider.name.clone(),
            });
        }
    }

    Ok(())
}

fn check_rates(config: &AggregatorConfig) -> Result<(), ConfigError> {
    if let Some(rate) = config.rate {
        check_rate("global", rate)?;
    }
    for provider in &config.providers {
        if let Some(rate) = provider.rate {
            check_rate(&format!("provider '{}'", provider.name), rate)?;
        }
    }
    Ok(())
}

/// The rate must map onto a non-zero token-bucket period.
fn check_rate(scope: &str, rate: f64) -> Result<(), ConfigError> {
    match rate_period(rate) {
        Some(_) => Ok(()),
        None => Err(ConfigError::InvalidRate {
            scope: scope.to_owned(),
            rate,
        }),
    }
}
