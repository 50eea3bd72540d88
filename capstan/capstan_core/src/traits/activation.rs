//! Activation context.
//!
//! The activation context decides whether a capability should conceptually
//! be active. References carry a handle to it but never consult it; whoever
//! drives `activate`/`passivate` (for example an activation listener) asks it.

use std::collections::HashSet;
use std::fmt;

use crate::id::CapabilityId;

/// Decides whether the conditions for activating a capability hold.
pub trait ActivationContext: Send + Sync + fmt::Debug {
    /// Whether the capability registered under `id` should be active.
    fn is_satisfied(&self, id: &CapabilityId) -> bool;
}

/// Context under which every capability may be active.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysSatisfied;

impl ActivationContext for AlwaysSatisfied {
    fn is_satisfied(&self, _id: &CapabilityId) -> bool {
        true
    }
}

/// Context under which only listed capabilities may be active.
#[derive(Debug, Default, Clone)]
pub struct Allowlist {
    allowed: HashSet<CapabilityId>,
}

impl Allowlist {
    /// Create an allowlist from the given ids.
    pub fn new(allowed: impl IntoIterator<Item = CapabilityId>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl ActivationContext for Allowlist {
    fn is_satisfied(&self, id: &CapabilityId) -> bool {
        self.allowed.contains(id)
    }
}
