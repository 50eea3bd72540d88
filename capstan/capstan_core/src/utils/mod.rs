//! Utility functions and types.
//!
//! Configuration file loading and logging setup.

pub mod config;
pub mod logging;

pub use config::{CapabilityDecl, RegistryConfig};
pub use logging::{init_logging, LogLevel, LoggingConfig};
