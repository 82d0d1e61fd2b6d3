use aggregator_core::AggregatorConfig;
use serde_json::{json, Value};
use tracing::info;

use crate::error::CliError;

pub fn run(config: &AggregatorConfig) -> Result<Value, CliError> {
    match config.crypto_key()? {
        None => Ok(json!({ "key": "not configured" })),
        Some(key) => {
            let kind = if key.is_secret() { "secret" } else { "public" };
            info!(kind, "signing key ready");
            Ok(json!({
                "key": "loaded",
                "kind": kind,
                "passphrase_set": config.passphrase.is_some(),
            }))
        }
    }
}
