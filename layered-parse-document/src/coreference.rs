//! Coreference chains read from `coref` arcs.
//!
//! Every connected group of nodes linked by [`Coreference`] arcs becomes one
//! chain, regardless of arc direction.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use layered_parse::{Coreference, NodeId, ParseGraph};

use crate::{ParsePhrase, ParseWord};

/// One reference to an entity: a single word or a whole phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mention {
    Word(ParseWord),
    Phrase(ParsePhrase),
}

impl Mention {
    pub fn node(&self) -> NodeId {
        match self {
            Mention::Word(word) => word.node(),
            Mention::Phrase(phrase) => phrase.node(),
        }
    }

    /// Position of the first word of the mention.
    pub fn position(&self) -> Option<usize> {
        match self {
            Mention::Word(word) => Some(word.position()),
            Mention::Phrase(phrase) => phrase.first_position(),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Mention::Word(word) => word.text().to_string(),
            Mention::Phrase(phrase) => phrase.text(),
        }
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Mentions referring to the same entity, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoreference {
    mentions: Vec<Mention>,
}

impl ParseCoreference {
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// The earliest mention.
    pub fn representative(&self) -> Option<&Mention> {
        self.mentions.first()
    }

    pub fn contains_word(&self, word: &ParseWord) -> bool {
        self.mentions.iter().any(|mention| match mention {
            Mention::Word(w) => w == word,
            Mention::Phrase(phrase) => phrase.contains_word(word),
        })
    }
}

impl fmt::Display for ParseCoreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for mention in &self.mentions {
            if !first {
                f.write_str(" -> ")?;
            }
            first = false;
            write!(f, "{}", mention)?;
        }
        Ok(())
    }
}

fn find(parents: &mut HashMap<NodeId, NodeId>, node: NodeId) -> NodeId {
    let parent = *parents.entry(node).or_insert(node);
    if parent == node {
        return node;
    }
    let root = find(parents, parent);
    parents.insert(node, root);
    root
}

/// Group the graph's coreference arcs into chains. Arc endpoints that are
/// neither a known word nor a known phrase are skipped.
pub(crate) fn resolve_chains(
    graph: &ParseGraph,
    words: &[ParseWord],
    phrases: &[ParsePhrase],
) -> Vec<ParseCoreference> {
    let mut mentions: HashMap<NodeId, Mention> = HashMap::new();
    for word in words {
        mentions.insert(word.node(), Mention::Word(word.clone()));
    }
    for phrase in phrases {
        mentions.insert(phrase.node(), Mention::Phrase(phrase.clone()));
    }

    let mut parents = HashMap::new();
    for arc in graph.arcs_of::<Coreference>() {
        if !mentions.contains_key(&arc.source) || !mentions.contains_key(&arc.target) {
            continue;
        }
        let source = find(&mut parents, arc.source);
        let target = find(&mut parents, arc.target);
        if source != target {
            parents.insert(source, target);
        }
    }

    let linked: Vec<NodeId> = parents.keys().copied().collect();
    let mut groups: BTreeMap<NodeId, Vec<Mention>> = BTreeMap::new();
    for node in linked {
        let root = find(&mut parents, node);
        if let Some(mention) = mentions.get(&node) {
            groups.entry(root).or_default().push(mention.clone());
        }
    }

    let mut chains: Vec<ParseCoreference> = groups
        .into_values()
        .map(|mut group| {
            group.sort_by_key(|mention| (mention.position(), mention.node()));
            ParseCoreference { mentions: group }
        })
        .collect();
    chains.sort_by_key(|chain| {
        chain
            .representative()
            .map(|mention| (mention.position(), mention.node()))
    });
    chains
}
