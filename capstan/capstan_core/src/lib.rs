//! # Capstan Core
//!
//! `capstan_core` provides the building blocks shared by the Capstan
//! capability registry and its hosts: identifiers, the error taxonomy, the
//! traits implemented by external collaborators, and configuration and
//! logging utilities.
//!
//! ## Crate Structure
//!
//! - **error**: Error types, split by the part of the system that raises them
//! - **id**: Capability identifiers and capability types
//! - **traits**: `Capability`, `CapabilityFactory` and `ActivationContext`
//! - **utils**: Configuration files and logging setup

pub mod error;
pub mod id;
pub mod traits;
pub mod utils;

// Re-export key types and traits for convenience
pub use error::{
    CapabilityError, ConfigError, ConfigurationError, CreationError, Error, ListenerError, Result,
};
pub use id::{CapabilityId, CapabilityType};
pub use traits::{ActivationContext, Allowlist, AlwaysSatisfied, Capability, CapabilityFactory};
pub use utils::{CapabilityDecl, LogLevel, LoggingConfig, RegistryConfig};
