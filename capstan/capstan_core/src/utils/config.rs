//! Registry configuration files.
//!
//! A configuration file declares the capabilities a host creates at startup
//! and how it logs. TOML is the default format; files ending in `.json` are
//! read as JSON.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [[capabilities]]
//! id = "audit"
//! type = "log"
//! activate = true
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, Result};
use crate::id::{CapabilityId, CapabilityType};
use crate::utils::logging::LoggingConfig;

/// One capability to create at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDecl {
    /// Identifier to register the capability under
    pub id: CapabilityId,

    /// Type selecting the factory
    #[serde(rename = "type")]
    pub capability_type: CapabilityType,

    /// Whether to activate the capability once created
    #[serde(default)]
    pub activate: bool,
}

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Capabilities to create, in declaration order
    #[serde(default)]
    pub capabilities: Vec<CapabilityDecl>,
}

impl RegistryConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadFailed(format!("{}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RegistryConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // A repeated id would silently replace the earlier capability
        let mut seen = HashSet::new();
        for decl in &self.capabilities {
            if !seen.insert(&decl.id) {
                return Err(
                    ConfigError::Invalid(format!("Duplicate capability id: {}", decl.id)).into(),
                );
            }
        }

        Ok(())
    }

    /// The distinct capability types the configuration refers to.
    pub fn capability_types(&self) -> Vec<&CapabilityType> {
        let mut types: Vec<&CapabilityType> = Vec::new();
        for decl in &self.capabilities {
            if !types.contains(&&decl.capability_type) {
                types.push(&decl.capability_type);
            }
        }
        types
    }
}
