//! Text-to-graph parse pipeline for layered-parse.
//!
//! Raw text runs through a fixed sequence of stages:
//!
//! 1. **hypothesis**: Unicode word-bound tokenization into a main hypothesis
//! 2. **tagging**: a [`Tagger`] engine adds part-of-speech, chunk, sentence
//!    and named-entity tags
//! 3. **graph building**: a [`GraphBuilder`] engine turns the tagged tokens
//!    into a [`ParseGraph`]
//!
//! Engines are heavyweight; the [`PipelineRuntime`] creates each one lazily,
//! once, and reuses it for every run. Optional [`Agent`]s then run on the
//! finished graph.
//!
//! ## Example
//!
//! ```
//! use layered_parse::{attr, PipelineRuntime, RuntimeConfig};
//!
//! let runtime = PipelineRuntime::new(RuntimeConfig::default());
//! let graph = runtime.run("The server stores data.").unwrap();
//!
//! let words: Vec<&str> = graph
//!     .token_nodes()
//!     .iter()
//!     .filter_map(|node| node.text(attr::VALUE))
//!     .collect();
//! assert_eq!(words, ["The", "server", "stores", "data", "."]);
//! assert!(runtime.is_initialized());
//! ```

mod agent;
mod config;
mod error;
mod graph;
mod graph_builder;
mod hypothesis;
mod pre_pipeline;
mod runtime;
mod tagger;


// Pipeline runtime
pub use runtime::{PipelineRuntime, RuntimeBuilder};

pub use config::{AgentKind, CoreferenceConfig, RuntimeConfig, TaggerConfig};
pub use error::{AgentError, PipelineError, Stage};

// Stages and engines
pub use graph_builder::{GraphBuilder, TokenGraphBuilder};
pub use hypothesis::{string_to_main_hypothesis, Hypothesis, HypothesisToken};
pub use pre_pipeline::PrePipelineData;
pub use tagger::{ChunkTag, Iob, RuleTagger, Tagger, NER_OUTSIDE};

// Agents
pub use agent::{Agent, AgentOutcome, Executable, PronounCorefAgent, EXEC_CAPABILITY};

// Intermediate graph
pub use graph::{
    attr, node_type, ArcId, AttrValue, Coreference, Next, Node, NodeId, ParseGraph,
    ParseGraphDisplay, PhraseMember, Relation, RelationAny, RelationArc,
};
