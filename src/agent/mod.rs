//! Optional analysis units that run on a finished graph.
//!
//! An [`Agent`] is bound to a graph and initialized against it; its actual
//! work is exposed as a named capability rather than as part of the trait,
//! so the runtime looks it up by name ([`EXEC_CAPABILITY`]) before running
//! it. Every failure along the way is recoverable: the runtime reports it as
//! [`AgentOutcome::Failed`] and carries on.

mod coref;

pub use coref::PronounCorefAgent;

use crate::error::AgentError;
use crate::graph::ParseGraph;

/// Name of the capability the runtime invokes on every agent.
pub const EXEC_CAPABILITY: &str = "exec";

/// The work an agent performs on its bound graph.
pub trait Executable {
    fn exec(&mut self, graph: &mut ParseGraph) -> Result<(), AgentError>;
}

/// An analysis unit (NER, coreference, ...) run after graph building.
pub trait Agent {
    fn name(&self) -> &str;

    /// Bind the agent to `graph` and prepare it for execution.
    fn init(&mut self, graph: &ParseGraph) -> Result<(), AgentError>;

    /// Look up a capability by name.
    fn capability(&mut self, name: &str) -> Option<&mut dyn Executable> {
        let _ = name;
        None
    }
}

/// Result of running one agent. Failures never abort the caller.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    Executed,
    Failed(AgentError),
}

impl AgentOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, AgentOutcome::Executed)
    }

    pub fn error(&self) -> Option<&AgentError> {
        match self {
            AgentOutcome::Executed => None,
            AgentOutcome::Failed(err) => Some(err),
        }
    }
}

/// Bind, initialize and execute `agent` on `graph`, logging any failure.
pub(crate) fn execute(agent: &mut dyn Agent, graph: &mut ParseGraph) -> AgentOutcome {
    let name = agent.name().to_string();
    let result = agent.init(graph).and_then(|()| match agent.capability(EXEC_CAPABILITY) {
        Some(executable) => executable.exec(graph),
        None => Err(AgentError::CapabilityNotFound {
            agent: name.clone(),
            capability: EXEC_CAPABILITY.to_string(),
        }),
    });

    match result {
        Ok(()) => {
            log::debug!("agent '{}' executed", name);
            AgentOutcome::Executed
        }
        Err(err) => {
            log::warn!("{}", err);
            AgentOutcome::Failed(err)
        }
    }
}
