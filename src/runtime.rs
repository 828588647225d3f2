//! The pipeline runtime: lazily created engines plus the fixed
//! text → hypothesis → tags → graph sequence.

use once_cell::unsync::OnceCell;

use crate::agent::{self, Agent, AgentOutcome, PronounCorefAgent};
use crate::config::{AgentKind, RuntimeConfig};
use crate::error::PipelineError;
use crate::graph::ParseGraph;
use crate::graph_builder::{GraphBuilder, TokenGraphBuilder};
use crate::hypothesis::string_to_main_hypothesis;
use crate::pre_pipeline::PrePipelineData;
use crate::tagger::{RuleTagger, Tagger};

type TaggerFactory = Box<dyn Fn() -> Box<dyn Tagger>>;
type GraphBuilderFactory = Box<dyn Fn() -> Box<dyn GraphBuilder>>;

/// Builder for a [`PipelineRuntime`] with custom engines.
///
/// ```
/// use layered_parse::{PipelineRuntime, RuleTagger, RuntimeConfig};
///
/// let runtime = PipelineRuntime::builder(RuntimeConfig::default())
///     .tagger(|| Box::new(RuleTagger::default()))
///     .build();
/// assert!(!runtime.is_initialized());
/// ```
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    tagger: Option<TaggerFactory>,
    graph_builder: Option<GraphBuilderFactory>,
}

impl RuntimeBuilder {
    /// Engine factory for the tagging stage. Called once per successful
    /// initialization.
    pub fn tagger<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Tagger> + 'static,
    {
        self.tagger = Some(Box::new(factory));
        self
    }

    /// Engine factory for the graph-building stage.
    pub fn graph_builder<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn GraphBuilder> + 'static,
    {
        self.graph_builder = Some(Box::new(factory));
        self
    }

    pub fn build(self) -> PipelineRuntime {
        let RuntimeBuilder {
            config,
            tagger,
            graph_builder,
        } = self;

        let tagger_factory = match tagger {
            Some(factory) => factory,
            None => {
                let tagger_config = config.tagger.clone();
                Box::new(move || -> Box<dyn Tagger> {
                    Box::new(RuleTagger::new(tagger_config.clone()))
                }) as TaggerFactory
            }
        };
        let graph_builder_factory = match graph_builder {
            Some(factory) => factory,
            None => Box::new(|| -> Box<dyn GraphBuilder> { Box::new(TokenGraphBuilder) })
                as GraphBuilderFactory,
        };

        PipelineRuntime {
            config,
            tagger_factory,
            graph_builder_factory,
            tagger: OnceCell::new(),
            graph_builder: OnceCell::new(),
        }
    }
}

/// Owns the heavyweight engines and runs text through the pipeline.
///
/// Engines are created on the first [`initialize`](Self::initialize) (or
/// [`run`](Self::run)) and reused for the lifetime of the runtime.
pub struct PipelineRuntime {
    config: RuntimeConfig,
    tagger_factory: TaggerFactory,
    graph_builder_factory: GraphBuilderFactory,
    tagger: OnceCell<Box<dyn Tagger>>,
    graph_builder: OnceCell<Box<dyn GraphBuilder>>,
}

impl Default for PipelineRuntime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl std::fmt::Debug for PipelineRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRuntime")
            .field("config", &self.config)
            .field("tagger", &self.tagger.get().map(|t| t.name()))
            .field("graph_builder", &self.graph_builder.get().map(|b| b.name()))
            .finish()
    }
}

impl PipelineRuntime {
    /// Runtime with the bundled engines.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: RuntimeConfig) -> RuntimeBuilder {
        RuntimeBuilder {
            config,
            tagger: None,
            graph_builder: None,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Create any engine that does not exist yet: graph builder first, then
    /// tagger. Live engines are never re-created; an engine whose `init`
    /// failed is created again on the next call.
    pub fn initialize(&self) -> Result<(), PipelineError> {
        self.engines().map(|_| ())
    }

    fn engines(&self) -> Result<(&dyn Tagger, &dyn GraphBuilder), PipelineError> {
        let graph_builder = self.graph_builder.get_or_try_init(|| {
            let mut builder = (self.graph_builder_factory)();
            builder.init()?;
            log::debug!("created graph builder '{}'", builder.name());
            Ok::<_, PipelineError>(builder)
        })?;
        let tagger = self.tagger.get_or_try_init(|| {
            let mut tagger = (self.tagger_factory)();
            tagger.init()?;
            log::debug!("created tagger '{}'", tagger.name());
            Ok::<_, PipelineError>(tagger)
        })?;
        Ok((&**tagger, &**graph_builder))
    }

    /// Whether both engines are live.
    pub fn is_initialized(&self) -> bool {
        self.tagger.get().is_some() && self.graph_builder.get().is_some()
    }

    pub fn tagger(&self) -> Option<&dyn Tagger> {
        self.tagger.get().map(|t| &**t)
    }

    pub fn graph_builder(&self) -> Option<&dyn GraphBuilder> {
        self.graph_builder.get().map(|b| &**b)
    }

    /// Run `text` through every stage and the configured agents.
    pub fn run(&self, text: &str) -> Result<ParseGraph, PipelineError> {
        let (tagger, graph_builder) = self.engines()?;

        let mut data = PrePipelineData::new();
        data.set_main_hypothesis(string_to_main_hypothesis(
            text,
            self.config.split_punctuation,
        )?);
        tagger.exec(&mut data)?;
        graph_builder.exec(&mut data)?;
        let mut graph = data.into_graph()?;

        for kind in &self.config.agents {
            let mut agent = self.create_agent(*kind);
            let _ = self.run_agent(agent.as_mut(), &mut graph);
        }

        Ok(graph)
    }

    /// Initialize `agent` against `graph` and invoke its exec capability.
    /// Failures are logged and returned, never propagated.
    pub fn run_agent(&self, agent: &mut dyn Agent, graph: &mut ParseGraph) -> AgentOutcome {
        agent::execute(agent, graph)
    }

    fn create_agent(&self, kind: AgentKind) -> Box<dyn Agent> {
        match kind {
            AgentKind::Coreference => {
                Box::new(PronounCorefAgent::new(self.config.coreference.clone()))
            }
        }
    }
}
