//! Settings loading
//!
//! Resolution order for every setting:
//! 1. Command-line flag (applied by the binary)
//! 2. TOML file given with `--config`
//! 3. Compiled default
//!
//! ```toml
//! dictionary_path = "symptoms_dict.json"
//! symptom_column = "Other_Symptoms"
//! default_severities = ["Mild", "Low", "High"]
//!
//! [matching]
//! filter = "containment"
//! enhance = "exact"
//! ```

use crate::dictionary::default_severities;
use crate::enhancer::EnhancePolicy;
use crate::error::{Error, Result};
use crate::matcher::MatchStrategy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_DICTIONARY_PATH: &str = "symptoms_dict.json";
pub const DEFAULT_SYMPTOM_COLUMN: &str = "Other_Symptoms";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Dictionary file, read at start-up and rewritten at each checkpoint
    pub dictionary_path: PathBuf,
    /// Column holding the comma-separated symptom text
    pub symptom_column: String,
    /// Severity labels for automatically discovered symptoms
    pub default_severities: Vec<String>,
    pub matching: MatchingConfig,
}

/// Match strategy per use site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingConfig {
    /// Record filtering against the raw symptom cell
    pub filter: MatchStrategy,
    /// "Already known?" check during enhancement and manual update
    pub enhance: MatchStrategy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            filter: MatchStrategy::Containment,
            enhance: MatchStrategy::Exact,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            symptom_column: DEFAULT_SYMPTOM_COLUMN.to_string(),
            default_severities: default_severities(),
            matching: MatchingConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        if settings.default_severities.is_empty() {
            return Err(Error::Config(
                "default_severities must name at least one level".to_string(),
            ));
        }
        Ok(settings)
    }

    /// Load settings from an explicitly named TOML file
    ///
    /// # Errors
    ///
    /// A missing or unreadable file is an error here; only the absence of
    /// `--config` altogether falls back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let settings = Self::from_toml_str(&content)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn enhance_policy(&self) -> EnhancePolicy {
        EnhancePolicy {
            strategy: self.matching.enhance,
            severities: self.default_severities.clone(),
        }
    }
}
