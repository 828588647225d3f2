//! Error types for the parse pipeline.
//!
//! Stage and missing-data failures abort a pipeline run. Agent failures are
//! recoverable and only ever surface inside an [`AgentOutcome`](crate::AgentOutcome).

use thiserror::Error;

/// The fixed stages of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Raw text to main hypothesis.
    Hypothesis,
    /// Linguistic tagging of the hypothesis.
    Tagging,
    /// Graph construction from the tagged hypothesis.
    GraphBuilding,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Hypothesis => "hypothesis",
            Stage::Tagging => "tagging",
            Stage::GraphBuilding => "graph-building",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that abort a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A stage could not complete (malformed input, engine failure).
    #[error("{stage} stage failed: {message}")]
    Stage { stage: Stage, message: String },

    /// A stage needed output that an earlier stage did not produce.
    #[error("{stage} stage is missing required data: {what}")]
    MissingData { stage: Stage, what: &'static str },
}

impl PipelineError {
    pub fn stage(stage: Stage, message: impl Into<String>) -> Self {
        PipelineError::Stage {
            stage,
            message: message.into(),
        }
    }

    pub fn missing(stage: Stage, what: &'static str) -> Self {
        PipelineError::MissingData { stage, what }
    }

    /// The stage that reported this error.
    pub fn failed_stage(&self) -> Stage {
        match self {
            PipelineError::Stage { stage, .. } | PipelineError::MissingData { stage, .. } => *stage,
        }
    }

    pub fn is_missing_data(&self) -> bool {
        matches!(self, PipelineError::MissingData { .. })
    }
}

/// Failure to locate, initialize, or execute an agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The agent does not expose the requested capability.
    #[error("agent '{agent}' has no '{capability}' capability")]
    CapabilityNotFound { agent: String, capability: String },

    /// The agent refused to initialize against the bound graph.
    #[error("agent '{agent}' failed to initialize: {message}")]
    Init { agent: String, message: String },

    /// The agent's execution failed.
    #[error("agent '{agent}' failed to execute: {message}")]
    Exec { agent: String, message: String },
}

impl AgentError {
    pub fn init(agent: impl Into<String>, message: impl Into<String>) -> Self {
        AgentError::Init {
            agent: agent.into(),
            message: message.into(),
        }
    }

    pub fn exec(agent: impl Into<String>, message: impl Into<String>) -> Self {
        AgentError::Exec {
            agent: agent.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_error_display() {
        let err = PipelineError::stage(Stage::Hypothesis, "input contains no tokens");
        assert_eq!(
            err.to_string(),
            "hypothesis stage failed: input contains no tokens"
        );
        assert_eq!(err.failed_stage(), Stage::Hypothesis);
        assert!(!err.is_missing_data());
    }

    #[test]
    fn test_missing_data_display() {
        let err = PipelineError::missing(Stage::GraphBuilding, "part-of-speech tags");
        assert_eq!(
            err.to_string(),
            "graph-building stage is missing required data: part-of-speech tags"
        );
        assert!(err.is_missing_data());
    }

    #[test]
    fn test_stages_are_ordered() {
        assert!(Stage::Hypothesis < Stage::Tagging);
        assert!(Stage::Tagging < Stage::GraphBuilding);
    }
}
