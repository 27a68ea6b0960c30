//! Run configuration
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! target_function = "setup"
//! source_file = "setup.py"
//! document_file = "setup.cfg"
//! ```
//!
//! Every key is optional; unknown keys are rejected.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default name of the call to migrate
pub const DEFAULT_TARGET_FUNCTION: &str = "setup";
/// Default imperative source file
pub const DEFAULT_SOURCE_FILE: &str = "setup.py";
/// Default declarative document file
pub const DEFAULT_DOCUMENT_FILE: &str = "setup.cfg";

/// Settings for one migration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// Name of the call whose keywords are migrated; `setup` also matches `setuptools.setup(...)`
    pub target_function: String,
    /// Source file name, relative to the project directory
    pub source_file: String,
    /// Document file name, relative to the project directory
    pub document_file: String,
}

impl MigrationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With target function
    #[inline]
    #[must_use]
    pub fn with_target_function(mut self, name: impl Into<String>) -> Self {
        self.target_function = name.into();
        self
    }

    /// With source file name
    #[inline]
    #[must_use]
    pub fn with_source_file(mut self, name: impl Into<String>) -> Self {
        self.source_file = name.into();
        self
    }

    /// With document file name
    #[inline]
    #[must_use]
    pub fn with_document_file(mut self, name: impl Into<String>) -> Self {
        self.document_file = name.into();
        self
    }

    /// Parse TOML configuration text
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` on malformed TOML, wrong types or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load TOML configuration from a file
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`MigrationConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_toml_str(&text)
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            target_function: DEFAULT_TARGET_FUNCTION.to_string(),
            source_file: DEFAULT_SOURCE_FILE.to_string(),
            document_file: DEFAULT_DOCUMENT_FILE.to_string(),
        }
    }
}
