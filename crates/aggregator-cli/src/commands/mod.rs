mod check;
mod key;

use aggregator_core::load_config;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Check => check::run(&config),
        Command::Key => key::run(&config),
    }
}
