//! Generator options, loaded from a TOML file.
//!
//! ```toml
//! convenience-methods = true
//! protocol-methods = true
//! operations = ["addUser", "listUsers"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::client::MethodKind;

/// Failure to load generator options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// What to plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Plan convenience methods.
    pub convenience_methods: bool,
    /// Plan protocol methods.
    pub protocol_methods: bool,
    /// Only plan these operations. `None` plans all of them.
    pub operations: Option<Vec<String>>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            convenience_methods: true,
            protocol_methods: false,
            operations: None,
        }
    }
}

impl GeneratorOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read options from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether `operation` passes the allow-list.
    pub fn includes_operation(&self, operation: &str) -> bool {
        self.operations
            .as_ref()
            .is_none_or(|ops| ops.iter().any(|op| op == operation))
    }

    /// Method variants to plan, convenience first.
    pub fn method_kinds(&self) -> Vec<MethodKind> {
        let mut kinds = Vec::with_capacity(2);
        if self.convenience_methods {
            kinds.push(MethodKind::Convenience);
        }
        if self.protocol_methods {
            kinds.push(MethodKind::Protocol);
        }
        kinds
    }
}
