//! Context configuration
//!
//! Read from the environment (`ECCODES_GRIBEX_MODE_ON`, `ECCODES_DEBUG`) or
//! from a TOML document.

use crate::errors::Result;
use serde::Deserialize;

pub const ENV_GRIBEX_MODE_ON: &str = "ECCODES_GRIBEX_MODE_ON";
pub const ENV_DEBUG: &str = "ECCODES_DEBUG";

/// Settings a [`Context`](super::Context) is created from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextConfig {
    /// Legacy numeric compatibility flag
    pub gribex_mode: bool,
    /// Deliver debug-severity messages to the logging handler
    pub debug: bool,
}

impl ContextConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            gribex_mode: flag_enabled(lookup(ENV_GRIBEX_MODE_ON)),
            debug: flag_enabled(lookup(ENV_DEBUG)),
        }
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// `CoreError::Config` for malformed TOML or unknown keys.
    ///
    /// ```
    /// use gribkit_core::diagnostics::ContextConfig;
    ///
    /// let cfg = ContextConfig::from_toml_str("gribex_mode = true").unwrap();
    /// assert!(cfg.gribex_mode);
    /// assert!(!cfg.debug);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// Variables are switches: any non-zero integer turns them on.
fn flag_enabled(value: Option<String>) -> bool {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .is_some_and(|v| v != 0)
}
