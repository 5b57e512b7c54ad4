//! Resetter configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use toast_scope::{OriginScopeBuilder, Scope, DEFAULT_SIBLING_PREFIXES, DEFAULT_UNSUPPORTED_SCHEMES};

use crate::error::ResetError;
use crate::request::ResetLevel;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scope used when a request does not name one
    pub default_scope: Scope,
    /// Subdomains added next to the base domain in family scope
    pub sibling_prefixes: Vec<String>,
    /// Scheme prefixes that are never reset
    pub unsupported_schemes: Vec<String>,
    /// Run overlapping resets of the same site one at a time
    pub serialize_same_site: bool,
    /// Preset used by the keyboard shortcut
    pub shortcut_level: ResetLevel,
    pub shortcut_scope: Scope,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&raw)?;

        tracing::debug!(path = %path.as_ref().display(), "Loaded config");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = self
            .sibling_prefixes
            .iter()
            .find(|p| p.trim().trim_matches('.').contains('.'))
        {
            return Err(ResetError::Config(format!(
                "sibling prefix must be a single label: {}",
                prefix
            )));
        }
        Ok(())
    }

    pub fn scope_builder(&self) -> OriginScopeBuilder {
        OriginScopeBuilder::new()
            .with_sibling_prefixes(self.sibling_prefixes.iter().cloned())
            .with_unsupported_schemes(self.unsupported_schemes.iter().cloned())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_scope: Scope::Origin,
            sibling_prefixes: DEFAULT_SIBLING_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unsupported_schemes: DEFAULT_UNSUPPORTED_SCHEMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            serialize_same_site: true,
            shortcut_level: ResetLevel::Dark,
            shortcut_scope: Scope::Family,
        }
    }
}
