//! Built-in listeners.

use std::sync::Arc;

use tracing::{debug, info};

use capstan_core::error::Result;

use crate::listener::CapabilityListener;
use crate::reference::CapabilityReference;

/// Logs every capability addition and removal.
#[derive(Debug, Default)]
pub struct LoggingListener;

impl CapabilityListener for LoggingListener {
    fn name(&self) -> &str {
        "logging"
    }

    fn on_add(&self, reference: &Arc<CapabilityReference>) -> Result<()> {
        info!("Capability added: {}", reference);
        Ok(())
    }

    fn on_remove(&self, reference: &Arc<CapabilityReference>) -> Result<()> {
        info!("Capability removed: {}", reference);
        Ok(())
    }
}

/// Drives activation from the activation context.
///
/// Activates each added capability whose activation context is satisfied,
/// and passivates each removed capability so it releases its resources.
#[derive(Debug, Default)]
pub struct ActivationListener;

impl CapabilityListener for ActivationListener {
    fn name(&self) -> &str {
        "activation"
    }

    fn on_add(&self, reference: &Arc<CapabilityReference>) -> Result<()> {
        if reference.activation_context().is_satisfied(reference.id()) {
            reference.activate();
        } else {
            debug!(
                "Activation context not satisfied for capability {}",
                reference.id()
            );
        }
        Ok(())
    }

    fn on_remove(&self, reference: &Arc<CapabilityReference>) -> Result<()> {
        reference.passivate();
        Ok(())
    }
}
