//! Built-in capability types
//!
//! These are the types the `capstan` binary can instantiate. `log` always
//! activates; `broken` never does, which shows a failing hook being
//! contained by the registry.

use capstan_core::error::{CapabilityError, Result};
use capstan_core::id::CapabilityId;
use capstan_core::traits::Capability;
use capstan_registry::FactoryLookup;
use tracing::info;

/// Capability that logs its transitions
pub struct LogCapability {
    id: CapabilityId,
}

impl Capability for LogCapability {
    fn id(&self) -> &CapabilityId {
        &self.id
    }

    fn activate(&self) -> Result<()> {
        info!("[{}] activated", self.id);
        Ok(())
    }

    fn passivate(&self) -> Result<()> {
        info!("[{}] passivated", self.id);
        Ok(())
    }
}

/// Capability whose activation hook always fails
pub struct BrokenCapability {
    id: CapabilityId,
}

impl Capability for BrokenCapability {
    fn id(&self) -> &CapabilityId {
        &self.id
    }

    fn activate(&self) -> Result<()> {
        Err(CapabilityError::ActivationFailed(format!(
            "{} is a broken capability and never activates",
            self.id
        ))
        .into())
    }

    fn passivate(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> String {
        format!("{} (broken)", self.id)
    }
}

/// Factories for every built-in type
pub fn factories() -> FactoryLookup {
    FactoryLookup::builder()
        .register("log", |id: &CapabilityId| -> Result<Box<dyn Capability>> {
            Ok(Box::new(LogCapability { id: id.clone() }))
        })
        .register("broken", |id: &CapabilityId| -> Result<Box<dyn Capability>> {
            Ok(Box::new(BrokenCapability { id: id.clone() }))
        })
        .build()
}
