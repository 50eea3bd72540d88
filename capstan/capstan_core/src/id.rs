//! Identifiers for capabilities and capability types.
//!
//! Both identifiers are caller-supplied strings wrapped in distinct types so
//! that an id can never be passed where a type is expected.
//!
//! # Examples
//!
//! ```
//! use capstan_core::id::{CapabilityId, CapabilityType};
//! use std::str::FromStr;
//!
//! let id = CapabilityId::new("central-proxy").unwrap();
//! let capability_type = CapabilityType::new("proxy");
//! assert_eq!(id.as_str(), "central-proxy");
//! assert_eq!(capability_type.to_string(), "proxy");
//!
//! // Empty ids are rejected
//! assert!(CapabilityId::from_str("  ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Identifier a capability is registered under.
///
/// Unique within a registry. Guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapabilityId(String);

impl CapabilityId {
    /// Create a capability id, rejecting empty or whitespace-only strings.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigurationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigurationError::InvalidId(id));
        }
        Ok(Self(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for CapabilityId {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CapabilityId {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CapabilityId> for String {
    fn from(id: CapabilityId) -> Self {
        id.0
    }
}

impl AsRef<str> for CapabilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier selecting the factory that builds a capability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityType(String);

impl CapabilityType {
    /// Create a capability type.
    pub fn new(capability_type: impl Into<String>) -> Self {
        Self(capability_type.into())
    }

    /// The type as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for CapabilityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for CapabilityType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for CapabilityType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
