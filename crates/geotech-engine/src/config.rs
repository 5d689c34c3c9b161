//! Analysis configuration
//!
//! Settings are read from an optional TOML file. Every key has a default,
//! so an empty file (or no file at all) yields the stock heuristics.
//!
//! ```toml
//! collapse_compounds = true
//! refusal_threshold_ft = 8.0
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Refusal shallower than this many feet counts as shallow
pub const DEFAULT_REFUSAL_THRESHOLD_FT: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Split compound symbols such as "SC-SM" into their constituent codes
    pub collapse_compounds: bool,
    /// Shallow-refusal threshold in feet (strictly below counts)
    pub refusal_threshold_ft: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            collapse_compounds: true,
            refusal_threshold_ft: DEFAULT_REFUSAL_THRESHOLD_FT,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or a value fails validation
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.refusal_threshold_ft.is_finite() || self.refusal_threshold_ft <= 0.0 {
            bail!(
                "refusal_threshold_ft must be a positive number of feet (got {})",
                self.refusal_threshold_ft
            );
        }
        Ok(())
    }
}
