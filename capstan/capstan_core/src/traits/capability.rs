//! Capability and factory traits.
//!
//! A capability is a named unit of pluggable behavior with a resource
//! acquisition/release pair: `activate` and `passivate`. The registry never
//! looks inside a capability; it only stores it and drives those two hooks
//! through a `CapabilityReference`.

use crate::error::Result;
use crate::id::CapabilityId;

/// Core trait for capabilities.
///
/// Hooks take `&self` because a capability is shared between the registry
/// and any thread holding its reference. Implementations use interior
/// mutability for whatever state activation creates.
///
/// A hook may fail by returning an error or by panicking. Either way the
/// owning reference contains the failure, so implementations do not need to
/// guard against taking the host down.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use capstan_core::error::Result;
/// use capstan_core::id::CapabilityId;
/// use capstan_core::traits::Capability;
///
/// struct Banner {
///     id: CapabilityId,
///     shown: AtomicBool,
/// }
///
/// impl Capability for Banner {
///     fn id(&self) -> &CapabilityId {
///         &self.id
///     }
///
///     fn activate(&self) -> Result<()> {
///         self.shown.store(true, Ordering::SeqCst);
///         Ok(())
///     }
///
///     fn passivate(&self) -> Result<()> {
///         self.shown.store(false, Ordering::SeqCst);
///         Ok(())
///     }
/// }
/// ```
pub trait Capability: Send + Sync {
    /// The identifier this capability was created under.
    fn id(&self) -> &CapabilityId;

    /// Acquire whatever the capability needs to do its work.
    fn activate(&self) -> Result<()>;

    /// Release what `activate` acquired.
    fn passivate(&self) -> Result<()>;

    /// Short human-readable description used in log lines.
    fn description(&self) -> String {
        self.id().to_string()
    }
}

/// Builds capabilities of one capability type.
///
/// Any closure `Fn(&CapabilityId) -> Result<Box<dyn Capability>>` is a factory.
pub trait CapabilityFactory: Send + Sync {
    /// Instantiate a capability that will be registered under `id`.
    fn create(&self, id: &CapabilityId) -> Result<Box<dyn Capability>>;
}

impl<F> CapabilityFactory for F
where
    F: Fn(&CapabilityId) -> Result<Box<dyn Capability>> + Send + Sync,
{
    fn create(&self, id: &CapabilityId) -> Result<Box<dyn Capability>> {
        self(id)
    }
}
