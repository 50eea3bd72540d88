//! Capability reference.
//!
//! A reference wraps one capability together with its activation state and
//! owns the capability's lifecycle transitions:
//!
//! ```text
//!              activate() ok
//!   Inactive ------------------> Active
//!      ^  \                     /  |
//!      |   `-- hook fails -----'   |  hook fails: stays Active
//!      |      stays Inactive       |
//!      +---------------------------+
//!              passivate() ok
//! ```
//!
//! Each transition calls the capability hook at most once: `activate` on an
//! active reference and `passivate` on an inactive one are no-ops. Hook
//! failures (errors or panics) are logged and never reach the caller; the
//! recorded state then reflects that the transition did not take effect.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use capstan_core::id::CapabilityId;
use capstan_core::traits::{ActivationContext, Capability};

use crate::isolation::isolate;

/// The registry's handle to a capability instance.
pub struct CapabilityReference {
    /// Identifier the capability was created under
    id: CapabilityId,

    /// The wrapped capability
    capability: Box<dyn Capability>,

    /// Current state, readable without waiting for a transition in flight
    active: AtomicBool,

    /// Serializes activate/passivate on this reference
    transition: Mutex<()>,

    /// Passed through to whoever drives activation; never consulted here
    activation_context: Arc<dyn ActivationContext>,
}

impl CapabilityReference {
    /// Wrap `capability`, initially inactive.
    pub fn new(
        id: CapabilityId,
        activation_context: Arc<dyn ActivationContext>,
        capability: Box<dyn Capability>,
    ) -> Self {
        Self {
            id,
            capability,
            active: AtomicBool::new(false),
            transition: Mutex::new(()),
            activation_context,
        }
    }

    /// Identifier this reference was created under.
    pub fn id(&self) -> &CapabilityId {
        &self.id
    }

    /// The wrapped capability.
    pub fn capability(&self) -> &dyn Capability {
        self.capability.as_ref()
    }

    /// The activation context handed to this reference.
    pub fn activation_context(&self) -> &Arc<dyn ActivationContext> {
        &self.activation_context
    }

    /// Whether the capability is currently active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Activate the capability unless it is already active.
    ///
    /// If the activation hook fails the reference stays inactive.
    pub fn activate(&self) {
        let _transition = self.transition.lock();
        if self.is_active() {
            debug!("Capability {} already active", self.id);
            return;
        }

        debug!("Activating capability {}", self.capability.description());
        match isolate(|| self.capability.activate()) {
            Ok(()) => {
                self.active.store(true, Ordering::Release);
                debug!("Activated capability {}", self.id);
            }
            Err(failure) => {
                warn!(
                    "Could not activate capability {}, leaving it inactive: {}",
                    self.capability.description(),
                    failure
                );
            }
        }
    }

    /// Passivate the capability if it is active.
    ///
    /// If the passivation hook fails the reference stays active.
    pub fn passivate(&self) {
        let _transition = self.transition.lock();
        if !self.is_active() {
            debug!("Capability {} already inactive", self.id);
            return;
        }

        debug!("Passivating capability {}", self.capability.description());
        match isolate(|| self.capability.passivate()) {
            Ok(()) => {
                self.active.store(false, Ordering::Release);
                debug!("Passivated capability {}", self.id);
            }
            Err(failure) => {
                warn!(
                    "Could not passivate capability {}, leaving it active: {}",
                    self.capability.description(),
                    failure
                );
            }
        }
    }
}

impl fmt::Debug for CapabilityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityReference")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .field("activation_context", &self.activation_context)
            .finish()
    }
}

impl fmt::Display for CapabilityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_active() { "active" } else { "inactive" };
        write!(f, "{} ({})", self.id, state)
    }
}
