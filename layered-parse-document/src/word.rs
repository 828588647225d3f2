use std::fmt;

use layered_parse::{attr, ChunkTag, Node, NodeId, NER_OUTSIDE};

use crate::DocumentKey;

/// One token of a parsed document with the tags assigned by the pipeline.
///
/// Two words are equal when they come from the same graph node at the same
/// position of the same document; tags and text are not compared.
#[derive(Debug, Clone)]
pub struct ParseWord {
    document: DocumentKey,
    node: NodeId,
    position: usize,
    text: String,
    pos: String,
    chunk: ChunkTag,
    ner: String,
    sentence: usize,
    span: (usize, usize),
}

impl ParseWord {
    /// Read a word from a token node. Missing tags fall back to empty /
    /// outside values so hand-built graphs stay usable.
    pub(crate) fn from_node(
        node: &Node,
        fallback_position: usize,
        document: DocumentKey,
    ) -> Self {
        let int = |key: &str| node.int(key).and_then(|v| usize::try_from(v).ok());
        ParseWord {
            document,
            node: node.id(),
            position: node.position().unwrap_or(fallback_position),
            text: node.text(attr::VALUE).unwrap_or_default().to_string(),
            pos: node.text(attr::POS).unwrap_or_default().to_string(),
            chunk: node
                .text(attr::CHUNK_IOB)
                .and_then(ChunkTag::parse)
                .unwrap_or_else(ChunkTag::outside),
            ner: node.text(attr::NER).unwrap_or(NER_OUTSIDE).to_string(),
            sentence: int(attr::SENTENCE).unwrap_or(0),
            span: (int(attr::START).unwrap_or(0), int(attr::END).unwrap_or(0)),
        }
    }

    /// Key of the document this word was read from
    pub fn document(&self) -> DocumentKey {
        self.document
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Zero-based token index within the document
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Penn Treebank part-of-speech tag
    pub fn pos(&self) -> &str {
        &self.pos
    }

    pub fn chunk(&self) -> &ChunkTag {
        &self.chunk
    }

    /// Named-entity label, `"O"` outside entities
    pub fn ner(&self) -> &str {
        &self.ner
    }

    pub fn is_named_entity(&self) -> bool {
        !self.ner.is_empty() && self.ner != NER_OUTSIDE
    }

    pub fn sentence(&self) -> usize {
        self.sentence
    }

    /// Source byte range `(start, end)`
    pub fn span(&self) -> (usize, usize) {
        self.span
    }
}

impl PartialEq for ParseWord {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document
            && self.node == other.node
            && self.position == other.position
    }
}

impl Eq for ParseWord {}

impl fmt::Display for ParseWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
