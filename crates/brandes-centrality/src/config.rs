use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sources::Sources;

/// Run-time knobs for [`crate::betweenness_with_config`].
///
/// ```toml
/// sources = { sample = 64, seed = 3 }
/// batch_size = 16
/// normalized = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BetweennessConfig {
    #[serde(default)]
    pub sources: Sources,
    /// Maximum source columns per forward/backward pass. `None` runs every
    /// source in one batch.
    #[serde(default)]
    pub batch_size: Option<usize>,
    #[serde(default)]
    pub normalized: bool,
}

impl BetweennessConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or names an
    /// unknown field.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse betweenness config")
    }

    /// Load from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}
