//! Fills the settings the operator left out.

use std::num::NonZeroUsize;

use tracing::debug;

use crate::config::AggregatorConfig;

pub const DEFAULT_FOLDER: &str = "/var/www";
pub const DEFAULT_WEB: &str = "/var/www/html";
pub const DEFAULT_DOMAIN: &str = "https://example.com";

/// Upper bound for a computed worker count.
pub const DEFAULT_WORKERS: usize = 10;

/// Parallelism reported by the platform, 1 when it cannot tell.
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Resolves defaults in place given the reported hardware `parallelism`.
///
/// The worker count never exceeds the number of providers, so it is 0 when
/// there are none; validation rejects that case afterwards.
pub fn resolve_defaults(config: &mut AggregatorConfig, parallelism: usize) {
    fill_if_empty(&mut config.folder, DEFAULT_FOLDER);
    fill_if_empty(&mut config.web, DEFAULT_WEB);
    fill_if_empty(&mut config.domain, DEFAULT_DOMAIN);

    let requested = config.workers;
    let mut workers = usize::try_from(requested)
        .ok()
        .filter(|workers| *workers > 0)
        .unwrap_or_else(|| parallelism.min(DEFAULT_WORKERS));
    workers = workers.min(config.providers.len());
    config.workers = i64::try_from(workers).unwrap_or(i64::MAX);

    debug!(
        requested,
        parallelism,
        providers = config.providers.len(),
        workers,
        "resolved worker count"
    );
}

fn fill_if_empty(value: &mut String, fallback: &str) {
    if value.is_empty() {
        *value = fallback.to_owned();
    }
}
