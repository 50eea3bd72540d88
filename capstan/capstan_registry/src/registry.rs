//! Capability Registry
//!
//! Owns the mapping from capability id to reference and the set of
//! listeners, both behind a single reader/writer lock.
//!
//! `create`, `remove`, `add_listener` and `remove_listener` take the lock
//! exclusively; `get`, `get_all` and the other lookups share it. Listener
//! notifications run inside the exclusive section of the operation that
//! triggered them, so every listener has been told about a change before the
//! call that made it returns. The price is that a slow listener blocks all
//! readers and writers for as long as it runs, and a listener that calls back
//! into the registry deadlocks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use capstan_core::error::Result;
use capstan_core::id::{CapabilityId, CapabilityType};
use capstan_core::traits::ActivationContext;

use crate::factory::FactoryLookup;
use crate::isolation::isolate;
use crate::listener::CapabilityListener;
use crate::reference::CapabilityReference;

/// State guarded by the registry lock
#[derive(Default)]
struct RegistryState {
    /// References by the id they were created under
    references: HashMap<CapabilityId, Arc<CapabilityReference>>,

    /// Registered listeners, each at most once
    listeners: Vec<Arc<dyn CapabilityListener>>,
}

#[derive(Clone, Copy)]
enum Notification {
    Added,
    Removed,
}

impl Notification {
    fn describe(self) -> &'static str {
        match self {
            Notification::Added => "being created",
            Notification::Removed => "being removed",
        }
    }
}

/// Concurrency-safe registry of capability references.
pub struct CapabilityRegistry {
    /// Factories by capability type, fixed at construction
    factories: FactoryLookup,

    /// Handed to every reference this registry creates
    activation_context: Arc<dyn ActivationContext>,

    /// References and listeners
    state: RwLock<RegistryState>,
}

impl CapabilityRegistry {
    /// Create an empty registry.
    pub fn new(factories: FactoryLookup, activation_context: Arc<dyn ActivationContext>) -> Self {
        Self {
            factories,
            activation_context,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Create a capability of `capability_type` and register it under `id`.
    ///
    /// Any reference already registered under `id` is replaced without a
    /// removal notification. Listeners are told about the new reference
    /// before this returns. Fails, leaving the registry untouched, when no
    /// factory exists for the type or the factory fails.
    pub fn create(
        &self,
        id: CapabilityId,
        capability_type: &CapabilityType,
    ) -> Result<Arc<CapabilityReference>> {
        let mut state = self.state.write();

        let capability = self.factories.instantiate(&id, capability_type)?;
        let reference = Arc::new(CapabilityReference::new(
            id.clone(),
            self.activation_context.clone(),
            capability,
        ));

        if let Some(previous) = state.references.insert(id, reference.clone()) {
            debug!("Replaced capability {}", previous);
        }

        debug!(
            "Created capability {} of type {}. Notifying listeners...",
            reference, capability_type
        );
        Self::notify(&state.listeners, &reference, Notification::Added);

        Ok(reference)
    }

    /// Remove the reference registered under `id`.
    ///
    /// Returns `None` when nothing is registered under `id`; otherwise
    /// listeners are told about the removal before this returns.
    pub fn remove(&self, id: &CapabilityId) -> Option<Arc<CapabilityReference>> {
        let mut state = self.state.write();

        let reference = state.references.remove(id)?;
        debug!("Removed capability {}. Notifying listeners...", reference);
        Self::notify(&state.listeners, &reference, Notification::Removed);

        Some(reference)
    }

    /// The reference registered under `id`, if any.
    pub fn get(&self, id: &CapabilityId) -> Option<Arc<CapabilityReference>> {
        self.state.read().references.get(id).cloned()
    }

    /// Snapshot of all registered references.
    ///
    /// Later changes to the registry are not reflected in the returned
    /// vector.
    pub fn get_all(&self) -> Vec<Arc<CapabilityReference>> {
        self.state.read().references.values().cloned().collect()
    }

    /// Ids of all registered references, sorted.
    pub fn ids(&self) -> Vec<CapabilityId> {
        let mut ids: Vec<CapabilityId> = self.state.read().references.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Whether a reference is registered under `id`.
    pub fn contains(&self, id: &CapabilityId) -> bool {
        self.state.read().references.contains_key(id)
    }

    /// Number of registered references.
    pub fn len(&self) -> usize {
        self.state.read().references.len()
    }

    /// Whether no references are registered.
    pub fn is_empty(&self) -> bool {
        self.state.read().references.is_empty()
    }

    /// Register `listener` and replay every existing reference to it.
    ///
    /// The replay calls `on_add` once per registered reference, in the same
    /// order `get_all` would return them, before this returns. A listener
    /// that is already registered is left alone and gets no replay.
    pub fn add_listener(&self, listener: Arc<dyn CapabilityListener>) -> &Self {
        let mut state = self.state.write();

        if state.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            debug!("Listener {} already registered", listener.name());
            return self;
        }

        state.listeners.push(listener.clone());
        debug!(
            "Added listener {}. Notifying about existing capabilities...",
            listener.name()
        );

        for reference in state.references.values() {
            if let Err(failure) = isolate(|| listener.on_add(reference)) {
                warn!(
                    "Caught failure while notifying listener {} about existing capability {}: {}",
                    listener.name(),
                    reference,
                    failure
                );
            }
        }

        self
    }

    /// Stop delivering notifications to `listener`.
    ///
    /// No removal notifications are sent for existing references.
    pub fn remove_listener(&self, listener: &Arc<dyn CapabilityListener>) -> &Self {
        let mut state = self.state.write();

        let before = state.listeners.len();
        state.listeners.retain(|l| !Arc::ptr_eq(l, listener));
        if state.listeners.len() < before {
            debug!("Removed listener {}", listener.name());
        }

        self
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state.read().listeners.len()
    }

    /// The factory lookup this registry creates capabilities from.
    pub fn factories(&self) -> &FactoryLookup {
        &self.factories
    }

    /// The activation context handed to every reference.
    pub fn activation_context(&self) -> &Arc<dyn ActivationContext> {
        &self.activation_context
    }

    fn notify(
        listeners: &[Arc<dyn CapabilityListener>],
        reference: &Arc<CapabilityReference>,
        notification: Notification,
    ) {
        for listener in listeners {
            let outcome = isolate(|| match notification {
                Notification::Added => listener.on_add(reference),
                Notification::Removed => listener.on_remove(reference),
            });

            if let Err(failure) = outcome {
                warn!(
                    "Caught failure while notifying listener {} about capability {} {}: {}",
                    listener.name(),
                    reference,
                    notification.describe(),
                    failure
                );
            }
        }
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CapabilityRegistry")
            .field("factories", &self.factories)
            .field("references", &state.references.len())
            .field("listeners", &state.listeners.len())
            .finish()
    }
}
