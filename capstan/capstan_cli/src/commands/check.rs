//! Configuration validation command

use anyhow::{bail, Context, Result};
use clap::Args;

use capstan_core::utils::RegistryConfig;

use crate::builtin;

/// Arguments for the check command
#[derive(Args)]
pub struct CheckArgs {
    /// Path to the registry configuration file
    #[clap(long)]
    pub config: String,
}

/// Load the configuration and make sure every declared type can be built
pub fn execute_check(args: &CheckArgs) -> Result<()> {
    let config = RegistryConfig::load(&args.config)
        .with_context(|| format!("Failed to load configuration file: {}", args.config))?;

    let factories = builtin::factories();
    let unknown: Vec<String> = config
        .capability_types()
        .into_iter()
        .filter(|t| !factories.contains(t))
        .map(|t| t.to_string())
        .collect();

    if !unknown.is_empty() {
        bail!("unknown capability type(s): {}", unknown.join(", "));
    }

    println!(
        "Configuration OK: {} capabilities",
        config.capabilities.len()
    );
    Ok(())
}
