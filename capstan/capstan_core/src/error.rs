//! Error types for the Capstan capability registry.
//!
//! Errors are organized by the part of the system that raises them. Only
//! configuration and creation problems ever reach the caller of a registry
//! operation; capability hook failures and listener failures are returned by
//! collaborator code, contained by the registry, and only logged.
//!
//! The root error type, `Error`, can wrap any of the subsystem-specific
//! errors, allowing for uniform error handling at the top level.

use crate::id::{CapabilityId, CapabilityType};
use thiserror::Error;

/// Root error type for Capstan.
#[derive(Debug, Error)]
pub enum Error {
    /// The registry was asked for something it is not configured to provide
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A factory failed to instantiate a capability
    #[error("Creation error: {0}")]
    Creation(#[from] CreationError),

    /// A capability hook failed
    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),

    /// A listener callback failed
    #[error("Listener error: {0}")]
    Listener(#[from] ListenerError),

    /// Configuration file problems
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised when a request cannot be satisfied by the registry setup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No factory is registered for the requested capability type
    #[error("No factory found for a capability of type {0}")]
    NoFactory(CapabilityType),

    /// Capability identifiers must be non-empty
    #[error("Invalid capability id: {0:?}")]
    InvalidId(String),
}

/// Errors raised while a factory instantiates a capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreationError {
    /// The factory returned an error
    #[error("Factory for type {capability_type} failed to create capability {id}: {reason}")]
    FactoryFailed {
        /// Identifier the capability was requested under
        id: CapabilityId,

        /// Type whose factory failed
        capability_type: CapabilityType,

        /// Failure reported by the factory
        reason: String,
    },

    /// The factory panicked
    #[error("Factory for type {capability_type} panicked creating capability {id}: {reason}")]
    FactoryPanicked {
        /// Identifier the capability was requested under
        id: CapabilityId,

        /// Type whose factory panicked
        capability_type: CapabilityType,

        /// Panic payload, when it was a string
        reason: String,
    },
}

/// Errors returned by capability activation and passivation hooks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The activation hook could not acquire its resources
    #[error("Activation failed: {0}")]
    ActivationFailed(String),

    /// The passivation hook could not release its resources
    #[error("Passivation failed: {0}")]
    PassivationFailed(String),

    /// Any other hook failure
    #[error("{0}")]
    Other(String),
}

/// Errors returned by listener callbacks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener refused or failed to handle the notification
    #[error("Listener rejected notification: {0}")]
    Rejected(String),
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    /// The file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The file parsed but describes an invalid setup
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type used throughout Capstan.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_factory_message() {
        let err: Error = ConfigurationError::NoFactory(CapabilityType::new("mirror")).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: No factory found for a capability of type mirror"
        );
    }

    #[test]
    fn test_creation_error_names_id_and_type() {
        let err = CreationError::FactoryFailed {
            id: CapabilityId::new("central").unwrap(),
            capability_type: CapabilityType::new("proxy"),
            reason: "missing url".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("central"));
        assert!(message.contains("proxy"));
        assert!(message.contains("missing url"));
    }

    #[test]
    fn test_error_conversions() {
        let err: Error = CapabilityError::ActivationFailed("port in use".into()).into();
        assert!(matches!(err, Error::Capability(_)));

        let err: Error = ListenerError::Rejected("busy".into()).into();
        assert!(matches!(err, Error::Listener(_)));

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
