//! Caller-supplied annotations and the elements that can receive them.

use std::fmt;

use layered_parse::NodeId;
use serde::{Deserialize, Serialize};

use crate::{Document, DocumentKey, ParsePhrase, ParseSentence, ParseWord};

/// A label, optionally with a value, attached to a text element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Annotation {
    pub fn new(label: impl Into<String>) -> Self {
        Annotation {
            label: label.into(),
            value: None,
        }
    }

    pub fn with_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        Annotation {
            label: label.into(),
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.label, value),
            None => f.write_str(&self.label),
        }
    }
}

/// Concrete kind of a [`TextElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Word,
    Phrase,
    Sentence,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Word => "Word",
            ElementKind::Phrase => "Phrase",
            ElementKind::Sentence => "Sentence",
        })
    }
}

/// Key under which a document stores the annotations of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementRef {
    Word(NodeId),
    Phrase(NodeId),
    /// Sentence index
    Sentence(usize),
}

impl ElementRef {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Word(_) => ElementKind::Word,
            ElementRef::Phrase(_) => ElementKind::Phrase,
            ElementRef::Sentence(_) => ElementKind::Sentence,
        }
    }
}

/// An element was annotated against a document it was not read from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}[{element}] does not belong to document '{document}'")]
pub struct ForeignElement {
    pub kind: ElementKind,
    pub element: String,
    pub document: String,
}

/// Anything in a document that can receive an [`Annotation`].
///
/// Annotating records state in the owning document, not in the element
/// itself; read it back with [`Document::annotations`].
pub trait TextElement: fmt::Display {
    fn element_ref(&self) -> ElementRef;

    /// Key of the document the element was read from.
    fn document_key(&self) -> DocumentKey;

    fn kind(&self) -> ElementKind {
        self.element_ref().kind()
    }

    /// Record `annotation` for this element in `document`, which must be
    /// the document the element was read from.
    fn annotate(
        &self,
        document: &mut dyn Document,
        annotation: Annotation,
    ) -> Result<(), ForeignElement> {
        if self.document_key() != document.document_key() {
            return Err(ForeignElement {
                kind: self.kind(),
                element: self.to_string(),
                document: document.document_id().to_string(),
            });
        }
        document.record_annotation(self.element_ref(), annotation);
        Ok(())
    }
}

impl TextElement for ParseWord {
    fn element_ref(&self) -> ElementRef {
        ElementRef::Word(self.node())
    }

    fn document_key(&self) -> DocumentKey {
        self.document()
    }
}

impl TextElement for ParsePhrase {
    fn element_ref(&self) -> ElementRef {
        ElementRef::Phrase(self.node())
    }

    fn document_key(&self) -> DocumentKey {
        self.document()
    }
}

impl TextElement for ParseSentence {
    fn element_ref(&self) -> ElementRef {
        ElementRef::Sentence(self.index())
    }

    fn document_key(&self) -> DocumentKey {
        self.document()
    }
}
