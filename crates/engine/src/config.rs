//! Manager configuration via `paramstore.toml`
//!
//! Configuration is programmatic by default; a TOML file is an optional way
//! to supply the lock timeout, the registry capacity used at `init`, and
//! per-location memory descriptors.

use paramstore_core::{MemorySpecs, ParamError, Result, StorageLocation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "paramstore.toml";

/// Descriptor for one storage location, as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Location the descriptor belongs to
    pub location: StorageLocation,
    /// Capacity and partition metadata
    #[serde(flatten)]
    pub specs: MemorySpecs,
}

/// Manager configuration loaded from `paramstore.toml`.
///
/// # Example
///
/// ```toml
/// lock_timeout_ms = 50
/// capacity = 64
///
/// [[memory]]
/// location = "external_flash0"
/// capacity = 1048576
/// page_size = 256
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// How long operations wait for the manager lock, in milliseconds.
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    /// Number of parameters the registry is pre-sized for.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Memory descriptors registered right after `init`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub memory: Vec<MemoryConfig>,
}

fn default_lock_timeout_ms() -> u64 {
    50
}

fn default_capacity() -> usize {
    64
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
            capacity: default_capacity(),
            memory: Vec::new(),
        }
    }
}

impl ManagerConfig {
    /// Lock acquisition timeout
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    /// Check the config for values the manager cannot use.
    ///
    /// # Errors
    ///
    /// Returns an error if the same location is described more than once.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.memory {
            if !seen.insert(entry.location) {
                return Err(ParamError::Config(format!(
                    "memory location '{}' is described more than once",
                    entry.location
                )));
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Parameter manager configuration
#
# How long each operation waits for the manager lock before failing
# with a lock timeout (milliseconds).
lock_timeout_ms = 50

# Number of parameters the registry is pre-sized for at init.
capacity = 64

# Optional per-location memory descriptors. Locations:
#   internal_sram, internal_flash,
#   external_flash0, external_flash1, external_flash2,
#   external_sram0, external_sram1, external_sram2
# [[memory]]
# location = "external_flash0"
# base_address = 0          # optional, default 0
# capacity = 1048576
# page_size = 256           # optional, default 1
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ManagerConfig = toml::from_str(content)
            .map_err(|e| ParamError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ParamError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ParamError::Config(msg) => {
                ParamError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                ParamError::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ParamError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            ParamError::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
