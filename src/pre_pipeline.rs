//! Per-run working data threaded through the pipeline stages.

use crate::error::{PipelineError, Stage};
use crate::graph::ParseGraph;
use crate::hypothesis::Hypothesis;

/// Ephemeral state for a single pipeline run.
///
/// Each stage reads what the previous stage left here and writes its own
/// output back. Nothing in here outlives the run.
#[derive(Debug, Default)]
pub struct PrePipelineData {
    main_hypothesis: Option<Hypothesis>,
    graph: Option<ParseGraph>,
}

impl PrePipelineData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_main_hypothesis(&mut self, hypothesis: Hypothesis) {
        self.main_hypothesis = Some(hypothesis);
    }

    /// The main hypothesis, or a missing-data error attributed to `stage`.
    pub fn main_hypothesis(&self, stage: Stage) -> Result<&Hypothesis, PipelineError> {
        self.main_hypothesis
            .as_ref()
            .ok_or(PipelineError::missing(stage, "main hypothesis"))
    }

    pub fn main_hypothesis_mut(&mut self, stage: Stage) -> Result<&mut Hypothesis, PipelineError> {
        self.main_hypothesis
            .as_mut()
            .ok_or(PipelineError::missing(stage, "main hypothesis"))
    }

    pub fn has_main_hypothesis(&self) -> bool {
        self.main_hypothesis.is_some()
    }

    pub fn set_graph(&mut self, graph: ParseGraph) {
        self.graph = Some(graph);
    }

    pub fn graph(&self, stage: Stage) -> Result<&ParseGraph, PipelineError> {
        self.graph
            .as_ref()
            .ok_or(PipelineError::missing(stage, "graph"))
    }

    /// Take the finished graph out of the working data.
    pub fn into_graph(self) -> Result<ParseGraph, PipelineError> {
        self.graph
            .ok_or(PipelineError::missing(Stage::GraphBuilding, "graph"))
    }
}
