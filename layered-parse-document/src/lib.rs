//! Typed document view over a layered-parse graph.
//!
//! A [`ParseDocument`] materializes the words, phrases, sentences and
//! coreference chains of one [`ParseGraph`](layered_parse::ParseGraph) and
//! stores caller annotations for them.
//!
//! ## Core Types
//!
//! - [`ParseDocument`] / [`Document`] - The document and its annotation store
//! - [`ParseWord`], [`ParsePhrase`], [`ParseSentence`] - Annotatable elements
//! - [`ParseCoreference`] / [`Mention`] - Coreference chains
//! - [`Annotation`] / [`TextElement`] - Caller-supplied labels
//!
//! ## Example
//!
//! ```
//! use layered_parse::PipelineRuntime;
//! use layered_parse_document::{Annotation, Document, ParseDocument, TextElement};
//!
//! let graph = PipelineRuntime::default().run("Acme Corp ships parts.").unwrap();
//! let mut doc = ParseDocument::new(graph, "doc1");
//!
//! let entities: Vec<&str> = doc.named_entity_words().iter().map(|w| w.text()).collect();
//! assert_eq!(entities, ["Acme", "Corp"]);
//!
//! let word = doc.words()[2].clone();
//! word.annotate(&mut doc, Annotation::new("action")).unwrap();
//! assert_eq!(doc.annotations(&word.element_ref()), [Annotation::new("action")]);
//! ```

mod annotation;
mod coreference;
mod document;
mod phrase;
mod sentence;
mod summary;
mod word;


pub use annotation::{Annotation, ElementKind, ElementRef, ForeignElement, TextElement};
pub use coreference::{Mention, ParseCoreference};
pub use document::{Document, DocumentKey, ParseDocument};
pub use phrase::{ParsePhrase, PhraseKind};
pub use sentence::ParseSentence;
pub use summary::DocumentSummary;
pub use word::ParseWord;
