use std::fmt;

use layered_parse::NodeId;

use crate::{DocumentKey, ParseWord};

/// Syntactic category of a phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhraseKind {
    NounPhrase,
    VerbPhrase,
    PrepositionalPhrase,
    AdjectivePhrase,
    AdverbPhrase,
    /// Any label the tagger emits besides the five above
    Other(String),
}

impl PhraseKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "NP" => PhraseKind::NounPhrase,
            "VP" => PhraseKind::VerbPhrase,
            "PP" => PhraseKind::PrepositionalPhrase,
            "ADJP" => PhraseKind::AdjectivePhrase,
            "ADVP" => PhraseKind::AdverbPhrase,
            other => PhraseKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PhraseKind::NounPhrase => "NP",
            PhraseKind::VerbPhrase => "VP",
            PhraseKind::PrepositionalPhrase => "PP",
            PhraseKind::AdjectivePhrase => "ADJP",
            PhraseKind::AdverbPhrase => "ADVP",
            PhraseKind::Other(label) => label,
        }
    }
}

impl fmt::Display for PhraseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered group of words forming one syntactic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePhrase {
    document: DocumentKey,
    node: NodeId,
    kind: PhraseKind,
    words: Vec<ParseWord>,
}

impl ParsePhrase {
    pub(crate) fn new(
        node: NodeId,
        kind: PhraseKind,
        words: Vec<ParseWord>,
        document: DocumentKey,
    ) -> Self {
        ParsePhrase {
            document,
            node,
            kind,
            words,
        }
    }

    pub fn document(&self) -> DocumentKey {
        self.document
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn kind(&self) -> &PhraseKind {
        &self.kind
    }

    pub fn is_noun_phrase(&self) -> bool {
        self.kind == PhraseKind::NounPhrase
    }

    /// Member words in document order.
    pub fn words(&self) -> &[ParseWord] {
        &self.words
    }

    pub fn contains_word(&self, word: &ParseWord) -> bool {
        self.words.iter().any(|member| member == word)
    }

    /// Position of the first member word.
    pub fn first_position(&self) -> Option<usize> {
        self.words.first().map(ParseWord::position)
    }

    /// Member texts joined by single spaces.
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.words.iter().map(ParseWord::text).collect();
        texts.join(" ")
    }
}

impl fmt::Display for ParsePhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.text())
    }
}
