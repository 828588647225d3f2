//! Pipeline configuration.
//!
//! Every field has a default, so a partial TOML table (or none at all)
//! yields a working runtime.

use serde::{Deserialize, Serialize};

/// Optional agents the runtime can run on a finished graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Pronoun-to-noun-phrase coreference linking
    Coreference,
}

/// Configuration of the bundled rule tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Abbreviations whose trailing period does not end a sentence,
    /// on top of the built-in list.
    pub extra_abbreviations: Vec<String>,
    /// Whether determiners open noun phrases ("the server") or stay outside.
    pub include_determiners: bool,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            extra_abbreviations: Vec::new(),
            include_determiners: true,
        }
    }
}

/// Configuration of the pronoun coreference agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreferenceConfig {
    /// How many sentences back a pronoun may look for its antecedent.
    pub max_sentence_distance: usize,
}

impl Default for CoreferenceConfig {
    fn default() -> Self {
        Self {
            max_sentence_distance: 1,
        }
    }
}

/// Configuration for the pipeline runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Split punctuation into separate tokens when building the hypothesis.
    pub split_punctuation: bool,
    /// Agents to run, in order, after the graph is built.
    pub agents: Vec<AgentKind>,
    pub tagger: TaggerConfig,
    pub coreference: CoreferenceConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            split_punctuation: true,
            agents: Vec::new(),
            tagger: TaggerConfig::default(),
            coreference: CoreferenceConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Default configuration with the given agents enabled.
    pub fn with_agents(agents: Vec<AgentKind>) -> Self {
        Self {
            agents,
            ..Self::default()
        }
    }
}
