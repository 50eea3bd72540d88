//! # Capstan Registry
//!
//! A concurrency-safe registry managing the lifecycle of dynamically
//! pluggable capabilities inside a long-running host.
//!
//! - [`CapabilityRegistry`] creates, removes and looks up capabilities and
//!   fans lifecycle notifications out to [`CapabilityListener`]s.
//! - [`CapabilityReference`] wraps one capability and owns its
//!   inactive/active state machine.
//! - [`FactoryLookup`] maps capability types to the factories that build
//!   them.
//!
//! Misbehaving collaborators are contained: a failing or panicking factory
//! is reported to the caller of `create`, while failing or panicking
//! capability hooks and listener callbacks are logged and never propagate.
//!
//! ```
//! use std::sync::Arc;
//! use capstan_core::error::Result;
//! use capstan_core::id::{CapabilityId, CapabilityType};
//! use capstan_core::traits::{AlwaysSatisfied, Capability};
//! use capstan_registry::{CapabilityRegistry, FactoryLookup};
//!
//! struct Quiet(CapabilityId);
//!
//! impl Capability for Quiet {
//!     fn id(&self) -> &CapabilityId { &self.0 }
//!     fn activate(&self) -> Result<()> { Ok(()) }
//!     fn passivate(&self) -> Result<()> { Ok(()) }
//! }
//!
//! let factories = FactoryLookup::builder()
//!     .register("quiet", |id: &CapabilityId| -> Result<Box<dyn Capability>> {
//!         Ok(Box::new(Quiet(id.clone())))
//!     })
//!     .build();
//! let registry = CapabilityRegistry::new(factories, Arc::new(AlwaysSatisfied));
//!
//! let id = CapabilityId::new("x").unwrap();
//! let reference = registry.create(id.clone(), &CapabilityType::new("quiet")).unwrap();
//! reference.activate();
//! assert!(registry.get(&id).unwrap().is_active());
//! ```

pub mod bootstrap;
pub mod factory;
pub mod isolation;
pub mod listener;
pub mod listeners;
pub mod reference;
pub mod registry;

// Re-export key types for easier access
pub use bootstrap::{bootstrap, BootstrapFailure, BootstrapReport};
pub use factory::{FactoryLookup, FactoryLookupBuilder};
pub use listener::CapabilityListener;
pub use listeners::{ActivationListener, LoggingListener};
pub use reference::CapabilityReference;
pub use registry::CapabilityRegistry;
