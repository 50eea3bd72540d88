//! Capability listener interface.

use std::sync::Arc;

use capstan_core::error::Result;

use crate::reference::CapabilityReference;

/// Observer of capability additions and removals.
///
/// Callbacks run while the registry holds its write lock, so they must not
/// call back into the same registry (that deadlocks) and a slow callback
/// stalls every other registry operation until it returns.
///
/// Errors and panics raised by a callback are logged by the registry and
/// otherwise ignored; they never fail the operation that triggered them or
/// keep other listeners from being notified.
pub trait CapabilityListener: Send + Sync {
    /// Name used to identify this listener in log lines.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called after `reference` has been stored in the registry, and once
    /// per existing reference when the listener is added.
    fn on_add(&self, reference: &Arc<CapabilityReference>) -> Result<()>;

    /// Called after `reference` has been removed from the registry.
    fn on_remove(&self, reference: &Arc<CapabilityReference>) -> Result<()>;
}
