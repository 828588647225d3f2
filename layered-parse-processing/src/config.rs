//! TOML configuration for the processing facade.
//!
//! ```toml
//! [pipeline]
//! split_punctuation = true
//! agents = ["coreference"]
//!
//! [pipeline.tagger]
//! extra_abbreviations = ["approx"]
//! include_determiners = true
//!
//! [pipeline.coreference]
//! max_sentence_distance = 1
//! ```

use std::fs;
use std::path::Path;

use layered_parse::RuntimeConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level configuration. Every table and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub pipeline: RuntimeConfig,
}

impl ProcessingConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
