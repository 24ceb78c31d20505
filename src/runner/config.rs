//! Composition configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::runner::ds::error::ComposeError;

/// Knobs obeyed by the root capabilities of a [`Realm`](crate::runner::ds::realm::Realm).
///
/// Expected TOML format:
/// ```toml
/// coerce_nullish_props = false
/// max_chain_depth = 16
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Read `undefined`/`null` props as an empty mapping instead of failing with
    /// `InvalidTarget`.
    pub coerce_nullish_props: bool,

    /// Maximum number of nodes in a delegation chain, root included. `None` means
    /// unlimited.
    pub max_chain_depth: Option<usize>,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        ComposeConfig {
            coerce_nullish_props: true,
            max_chain_depth: None,
        }
    }
}

impl ComposeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coerce_nullish_props(mut self, coerce: bool) -> Self {
        self.coerce_nullish_props = coerce;
        self
    }

    pub fn with_max_chain_depth(mut self, limit: usize) -> Self {
        self.max_chain_depth = Some(limit);
        self
    }

    pub fn load(path: &Path) -> Result<Self, ComposeError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ComposeError::Config(format!("failed to read `{}`: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ComposeError> {
        let config: ComposeConfig =
            toml::from_str(content).map_err(|e| ComposeError::Config(e.to_string()))?;
        if config.max_chain_depth == Some(0) {
            return Err(ComposeError::Config(
                "max_chain_depth must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ComposeError> {
        toml::to_string_pretty(self).map_err(|e| ComposeError::Config(e.to_string()))
    }
}
