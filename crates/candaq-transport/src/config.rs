//! System configuration
//!
//! Loaded once at startup and treated as immutable for the rest of the run.
//! Every field has a default, so an empty JSON object is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::transport::TransportKind;

/// Configuration shared by the reader and the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// CAN interface name (e.g., "vcan0", "can0")
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Transport selector; "socketcan" selects the real binding
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Use 29-bit identifiers instead of 11-bit
    #[serde(default)]
    pub extended: bool,

    /// Print decoded lines instead of raw hex
    #[serde(default)]
    pub human_readable: bool,

    /// Identifiers to admit; empty admits everything
    #[serde(default)]
    pub filters: Vec<u32>,
}

fn default_interface() -> String {
    "vcan0".to_string()
}

fn default_driver() -> String {
    "socketcan".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
            driver: default_driver(),
            extended: false,
            human_readable: false,
            filters: Vec::new(),
        }
    }
}

impl SystemConfig {
    /// Load configuration from a file.
    ///
    /// `.toml` files are parsed as TOML, everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Transport binding selected by `driver`
    pub fn transport_kind(&self) -> TransportKind {
        TransportKind::from_driver(&self.driver)
    }

    /// Identifier mask for the configured id width
    pub fn id_mask(&self) -> u32 {
        if self.extended {
            candaq_core::CAN_EFF_MASK
        } else {
            candaq_core::CAN_SFF_MASK
        }
    }
}
