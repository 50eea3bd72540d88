//! Registry run command
//!
//! Bootstraps a registry from a configuration file, reports the resulting
//! capabilities, then removes them all so active ones are passivated.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use capstan_core::id::CapabilityId;
use capstan_core::traits::Allowlist;
use capstan_core::utils::{init_logging, RegistryConfig};
use capstan_registry::{
    bootstrap, ActivationListener, BootstrapFailure, CapabilityRegistry, LoggingListener,
};

use crate::builtin;

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Path to the registry configuration file
    #[clap(long)]
    pub config: String,

    /// Print the report as JSON
    #[clap(long)]
    pub json: bool,

    /// Fail if any capability could not be created or activated
    #[clap(long)]
    pub strict: bool,
}

/// One line of the run report
#[derive(Debug, Serialize)]
struct CapabilityRow {
    id: CapabilityId,
    #[serde(rename = "type")]
    capability_type: String,
    active: bool,
}

/// Report printed by the run command
#[derive(Debug, Serialize)]
struct RunReport {
    capabilities: Vec<CapabilityRow>,
    failed: Vec<BootstrapFailure>,
}

/// Implementation of the run command
pub fn execute_run(args: &RunArgs) -> Result<()> {
    let config = RegistryConfig::load(&args.config)
        .with_context(|| format!("Failed to load configuration file: {}", args.config))?;
    init_logging(&config.logging);

    // Capabilities flagged `activate` are the ones the context allows
    let context = Allowlist::new(
        config
            .capabilities
            .iter()
            .filter(|decl| decl.activate)
            .map(|decl| decl.id.clone()),
    );

    let registry = CapabilityRegistry::new(builtin::factories(), Arc::new(context));
    registry
        .add_listener(Arc::new(LoggingListener))
        .add_listener(Arc::new(ActivationListener));

    let outcome = bootstrap(&registry, &config);

    let capabilities = config
        .capabilities
        .iter()
        .filter_map(|decl| {
            registry.get(&decl.id).map(|reference| CapabilityRow {
                id: decl.id.clone(),
                capability_type: decl.capability_type.to_string(),
                active: reference.is_active(),
            })
        })
        .collect();
    let report = RunReport {
        capabilities,
        failed: outcome.failed.clone(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    info!("Shutting down registry");
    for id in registry.ids() {
        registry.remove(&id);
    }

    if args.strict && !outcome.is_clean() {
        bail!(
            "{} capabilities failed to create and {} failed to activate",
            outcome.failed.len(),
            outcome.inactive.len()
        );
    }

    Ok(())
}

fn print_table(report: &RunReport) {
    println!("{:<24} {:<12} {}", "ID", "TYPE", "STATE");
    for row in &report.capabilities {
        let state = if row.active { "active" } else { "inactive" };
        println!("{:<24} {:<12} {}", row.id, row.capability_type, state);
    }
    for failure in &report.failed {
        println!("{:<24} {:<12} {}", failure.id, "-", failure.reason);
    }
}
