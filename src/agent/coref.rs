//! Pronoun coreference over noun-phrase antecedents.
//!
//! Each third-person pronoun token is linked to the nearest earlier noun
//! phrase that agrees in number and lies within the configured sentence
//! window:
//!
//! ```text
//! The server stores data. It replicates them.
//! ╰────────╯              ╰╯
//! antecedent              pronoun ──coref──> "The server"
//! ```

use super::{Agent, Executable, EXEC_CAPABILITY};
use crate::config::CoreferenceConfig;
use crate::error::AgentError;
use crate::graph::{attr, node_type, Coreference, NodeId, ParseGraph, PhraseMember};

const SINGULAR_PRONOUNS: &[&str] = &["it", "its", "itself", "he", "him", "his", "she", "her"];
const PLURAL_PRONOUNS: &[&str] = &["they", "them", "their", "themselves"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Number {
    Singular,
    Plural,
}

#[derive(Debug, Clone)]
struct Antecedent {
    phrase: NodeId,
    first_position: usize,
    last_position: usize,
    sentence: usize,
    number: Number,
}

/// Links third-person pronouns to earlier noun phrases.
#[derive(Debug, Clone, Default)]
pub struct PronounCorefAgent {
    config: CoreferenceConfig,
    antecedents: Vec<Antecedent>,
}

impl PronounCorefAgent {
    pub fn new(config: CoreferenceConfig) -> Self {
        PronounCorefAgent {
            config,
            antecedents: Vec::new(),
        }
    }

    fn find_antecedent(&self, position: usize, sentence: usize, number: Number) -> Option<NodeId> {
        let earliest_sentence = sentence.saturating_sub(self.config.max_sentence_distance);
        self.antecedents
            .iter()
            .filter(|a| a.last_position < position)
            .filter(|a| a.sentence >= earliest_sentence && a.sentence <= sentence)
            .filter(|a| a.number == number)
            .max_by_key(|a| a.first_position)
            .map(|a| a.phrase)
    }
}

fn pronoun_number(text: &str) -> Option<Number> {
    let lower = text.to_lowercase();
    if SINGULAR_PRONOUNS.contains(&lower.as_str()) {
        Some(Number::Singular)
    } else if PLURAL_PRONOUNS.contains(&lower.as_str()) {
        Some(Number::Plural)
    } else {
        None
    }
}

fn is_pronoun_tag(tag: Option<&str>) -> bool {
    matches!(tag, Some("PRP") | Some("PRP$"))
}

impl Agent for PronounCorefAgent {
    fn name(&self) -> &str {
        "pronoun-coreference"
    }

    fn init(&mut self, graph: &ParseGraph) -> Result<(), AgentError> {
        if graph.nodes_of_type(node_type::TOKEN).next().is_none() {
            return Err(AgentError::init(self.name(), "graph has no token nodes"));
        }

        self.antecedents.clear();
        for phrase in graph.nodes_of_type(node_type::PHRASE) {
            if phrase.text(attr::KIND) != Some("NP") {
                continue;
            }
            let members: Vec<_> = graph
                .targets_of::<PhraseMember>(phrase.id())
                .into_iter()
                .filter_map(|id| graph.node(id))
                .collect();
            let head = match members.last() {
                Some(head) => head,
                None => continue,
            };
            if members.iter().all(|m| is_pronoun_tag(m.text(attr::POS))) {
                continue;
            }
            let positions: Vec<usize> = members.iter().filter_map(|m| m.position()).collect();
            let (first_position, last_position) =
                match (positions.iter().min(), positions.iter().max()) {
                    (Some(first), Some(last)) => (*first, *last),
                    _ => continue,
                };
            let number = match head.text(attr::POS) {
                Some("NNS") | Some("NNPS") => Number::Plural,
                _ => Number::Singular,
            };
            self.antecedents.push(Antecedent {
                phrase: phrase.id(),
                first_position,
                last_position,
                sentence: head.int(attr::SENTENCE).unwrap_or(0) as usize,
                number,
            });
        }
        Ok(())
    }

    fn capability(&mut self, name: &str) -> Option<&mut dyn Executable> {
        match name {
            EXEC_CAPABILITY => Some(self),
            _ => None,
        }
    }
}

impl Executable for PronounCorefAgent {
    fn exec(&mut self, graph: &mut ParseGraph) -> Result<(), AgentError> {
        let mut links = Vec::new();
        for token in graph.token_nodes() {
            if !is_pronoun_tag(token.text(attr::POS)) {
                continue;
            }
            let number = match token.text(attr::VALUE).and_then(pronoun_number) {
                Some(number) => number,
                None => continue,
            };
            let position = match token.position() {
                Some(position) => position,
                None => continue,
            };
            let sentence = token.int(attr::SENTENCE).unwrap_or(0) as usize;
            if let Some(antecedent) = self.find_antecedent(position, sentence, number) {
                links.push((token.id(), antecedent));
            }
        }

        for (pronoun, antecedent) in links {
            graph
                .add_arc(pronoun, antecedent, Coreference)
                .ok_or_else(|| AgentError::exec(self.name(), "antecedent is not in the graph"))?;
        }
        Ok(())
    }
}
