//! Interfaces implemented by the registry's external collaborators.

pub mod activation;
pub mod capability;

pub use activation::{ActivationContext, Allowlist, AlwaysSatisfied};
pub use capability::{Capability, CapabilityFactory};
