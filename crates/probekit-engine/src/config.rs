//! Probekit configuration (probekit.toml)
//!
//! ```toml
//! [query]
//! default_context = "system"
//! trail_separator = " / "
//!
//! [hooks]
//! on_bulk_failure = "rollback"   # or "keep-installed"
//! ```
//!
//! Every key is optional. The default loading context is never stored in a
//! global: callers build it from the config and pass it explicitly.

use std::path::Path;

use probekit_types::LoadingContext;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::finder::DEFAULT_SEPARATOR;
use crate::hook::BulkFailurePolicy;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProbeConfig {
    /// Query settings
    #[serde(default)]
    pub query: QueryConfig,

    /// Hook installation settings
    #[serde(default)]
    pub hooks: HookConfig,
}

/// Query settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryConfig {
    /// Loading context used when the caller does not supply one
    #[serde(default = "default_context_name")]
    pub default_context: String,

    /// Separator between diagnostics trail entries in failure messages
    #[serde(default = "default_trail_separator")]
    pub trail_separator: String,
}

/// Hook installation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HookConfig {
    /// What bulk installation does with successful intercepts when another
    /// member fails
    #[serde(default)]
    pub on_bulk_failure: BulkFailurePolicy,
}

fn default_context_name() -> String {
    "system".to_string()
}

fn default_trail_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_context: default_context_name(),
            trail_separator: default_trail_separator(),
        }
    }
}

impl ProbeConfig {
    /// Parse configuration from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build the default loading context
    pub fn default_context(&self) -> LoadingContext {
        LoadingContext::new(self.query.default_context.as_str())
    }
}
