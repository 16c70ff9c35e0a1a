//! Registry configuration
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! [registry]
//! strict = true
//! max_thumbnail_bytes = 32768
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::template::DEFAULT_MAX_THUMBNAIL_BYTES;

/// Options controlling how a registry is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Fail the build when the consistency lint reports anything
    pub strict: bool,
    /// Largest accepted thumbnail data URL, in bytes
    pub max_thumbnail_bytes: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_thumbnail_bytes: DEFAULT_MAX_THUMBNAIL_BYTES,
        }
    }
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    registry: Option<TomlRegistry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRegistry {
    strict: Option<bool>,
    max_thumbnail_bytes: Option<usize>,
}

impl RegistryConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        let registry = parsed.registry;

        Ok(RegistryConfig {
            strict: registry
                .as_ref()
                .and_then(|r| r.strict)
                .unwrap_or(defaults.strict),
            max_thumbnail_bytes: registry
                .as_ref()
                .and_then(|r| r.max_thumbnail_bytes)
                .unwrap_or(defaults.max_thumbnail_bytes),
        })
    }

    /// Enable or disable strict consistency checking
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the thumbnail size bound
    pub fn with_max_thumbnail_bytes(mut self, bytes: usize) -> Self {
        self.max_thumbnail_bytes = bytes;
        self
    }
}
