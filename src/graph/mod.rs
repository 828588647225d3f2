//! The intermediate linguistic graph.
//!
//! The graph-building stage emits a [`ParseGraph`]: typed nodes (tokens,
//! phrases) carrying ordered attributes, linked by typed [`RelationArc`]s.
//! Attribute maps are `BTreeMap`s so every dump of a graph is deterministic.

mod display;
mod relation;

pub use display::ParseGraphDisplay;
pub use relation::{ArcId, Coreference, Next, PhraseMember, Relation, RelationAny, RelationArc};

use std::collections::BTreeMap;

/// Node type names used by the built-in stages.
pub mod node_type {
    pub const TOKEN: &str = "token";
    pub const PHRASE: &str = "phrase";
}

/// Attribute keys used by the built-in stages.
pub mod attr {
    /// Surface text of a token
    pub const VALUE: &str = "value";
    /// Zero-based token index
    pub const POSITION: &str = "position";
    /// Source byte offsets
    pub const START: &str = "start";
    pub const END: &str = "end";
    pub const POS: &str = "pos";
    pub const CHUNK_IOB: &str = "chunkIOB";
    pub const CHUNK_NAME: &str = "chunkName";
    pub const NER: &str = "ner";
    pub const SENTENCE: &str = "sentence";
    /// Phrase kind ("NP", "VP", ...)
    pub const KIND: &str = "kind";
}

/// Identifier of a node within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A node attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Text(text) => f.write_str(text),
            AttrValue::Int(value) => write!(f, "{}", value),
            AttrValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// A typed node with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    node_type: String,
    attributes: BTreeMap<String, AttrValue>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Text attribute, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(AttrValue::as_str)
    }

    /// Integer attribute, if present and numeric.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.attr(key).and_then(AttrValue::as_int)
    }

    pub fn set(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Attributes in key order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Token position, for token nodes. Negative values read as absent.
    pub fn position(&self) -> Option<usize> {
        self.int(attr::POSITION).and_then(|p| usize::try_from(p).ok())
    }
}

/// The intermediate graph produced by the graph-building stage.
#[derive(Debug, Clone, Default)]
pub struct ParseGraph {
    nodes: Vec<Node>,
    arcs: Vec<RelationArc>,
}

impl ParseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without attributes.
    pub fn add_node(&mut self, node_type: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            node_type: node_type.to_string(),
            attributes: BTreeMap::new(),
        });
        id
    }

    /// Add a node with an initial set of attributes.
    pub fn add_node_with<'k, I>(&mut self, node_type: &str, attributes: I) -> NodeId
    where
        I: IntoIterator<Item = (&'k str, AttrValue)>,
    {
        let id = self.add_node(node_type);
        let node = &mut self.nodes[id.0];
        for (key, value) in attributes {
            node.attributes.insert(key.to_string(), value);
        }
        id
    }

    /// Add an arc between two existing nodes.
    ///
    /// Returns `None` when either endpoint is not a node of this graph.
    pub fn add_arc<R: Relation>(
        &mut self,
        source: NodeId,
        target: NodeId,
        relation: R,
    ) -> Option<ArcId> {
        if source.0 >= self.nodes.len() || target.0 >= self.nodes.len() {
            return None;
        }
        let id = ArcId(self.arcs.len());
        self.arcs.push(RelationArc::new(id, source, target, relation));
        Some(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_of_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |node| node.is_type(node_type))
    }

    /// Token nodes ordered by position, ties broken by insertion order.
    pub fn token_nodes(&self) -> Vec<&Node> {
        let mut tokens: Vec<&Node> = self.nodes_of_type(node_type::TOKEN).collect();
        tokens.sort_by_key(|node| (node.position().unwrap_or(usize::MAX), node.id));
        tokens
    }

    /// All arcs in insertion order.
    pub fn arcs(&self) -> &[RelationArc] {
        &self.arcs
    }

    /// Arcs carrying a relation of type `R`, in insertion order.
    pub fn arcs_of<R: Relation>(&self) -> impl Iterator<Item = &RelationArc> {
        self.arcs.iter().filter(|arc| arc.is::<R>())
    }

    pub fn outgoing(&self, source: NodeId) -> impl Iterator<Item = &RelationArc> {
        self.arcs.iter().filter(move |arc| arc.source == source)
    }

    pub fn incoming(&self, target: NodeId) -> impl Iterator<Item = &RelationArc> {
        self.arcs.iter().filter(move |arc| arc.target == target)
    }

    /// Targets of `R` arcs leaving `source`, in arc order.
    pub fn targets_of<R: Relation>(&self, source: NodeId) -> Vec<NodeId> {
        self.outgoing(source)
            .filter(|arc| arc.is::<R>())
            .map(|arc| arc.target)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
