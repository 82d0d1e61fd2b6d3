//! CLI argument definitions for the aggregator.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `check` | Load the settings and print what each provider resolves to |
//! | `key` | Load the signing key now instead of on first use |
//!
//! # Examples
//!
//! ```bash
//! aggregator check --config /etc/aggregator.toml --pretty
//! RUST_LOG=debug aggregator key
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Multi-provider aggregator: settings check and signing key status.
#[derive(Debug, Parser)]
#[command(name = "aggregator", author, version, about)]
pub struct Cli {
    /// Settings file; defaults to ./aggregator.toml.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Validate the settings and show the resolved per-provider policy.
    Check,
    /// Eagerly load the configured signing key.
    Key,
}
