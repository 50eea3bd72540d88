//! Registry bootstrap from configuration.
//!
//! Creates the capabilities a configuration file declares, in declaration
//! order, then activates the ones marked `activate = true`. A declaration
//! that cannot be created is recorded and skipped; it does not stop the
//! remaining ones.

use serde::Serialize;
use tracing::{info, warn};

use capstan_core::id::CapabilityId;
use capstan_core::utils::RegistryConfig;

use crate::registry::CapabilityRegistry;

/// A declaration that could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapFailure {
    /// Declared id
    pub id: CapabilityId,

    /// Why creation failed
    pub reason: String,
}

/// Outcome of [`bootstrap`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    /// Ids created, in declaration order
    pub created: Vec<CapabilityId>,

    /// Ids active once bootstrap finished, among those asked to activate
    pub activated: Vec<CapabilityId>,

    /// Ids asked to activate that ended up inactive
    pub inactive: Vec<CapabilityId>,

    /// Declarations that could not be created
    pub failed: Vec<BootstrapFailure>,
}

impl BootstrapReport {
    /// Whether every declaration was created and every requested activation
    /// took effect.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.inactive.is_empty()
    }
}

/// Populate `registry` from `config`.
pub fn bootstrap(registry: &CapabilityRegistry, config: &RegistryConfig) -> BootstrapReport {
    info!(
        "Bootstrapping {} capabilities",
        config.capabilities.len()
    );

    let mut report = BootstrapReport::default();
    let mut to_activate = Vec::new();

    for decl in &config.capabilities {
        match registry.create(decl.id.clone(), &decl.capability_type) {
            Ok(reference) => {
                report.created.push(decl.id.clone());
                if decl.activate {
                    to_activate.push(reference);
                }
            }
            Err(err) => {
                warn!("Could not create capability {}: {}", decl.id, err);
                report.failed.push(BootstrapFailure {
                    id: decl.id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    for reference in to_activate {
        reference.activate();
        if reference.is_active() {
            report.activated.push(reference.id().clone());
        } else {
            report.inactive.push(reference.id().clone());
        }
    }

    info!(
        "Bootstrap complete: {} created, {} activated, {} failed",
        report.created.len(),
        report.activated.len(),
        report.failed.len()
    );

    report
}
