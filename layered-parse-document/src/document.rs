//! The document view over one parse graph.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use layered_parse::{attr, node_type, NodeId, ParseGraph, PhraseMember};

use crate::annotation::{Annotation, ElementRef};
use crate::coreference::{resolve_chains, ParseCoreference};
use crate::{ParsePhrase, ParseSentence, ParseWord, PhraseKind};

/// Identity of one document instance.
///
/// Every element read from a document carries its key, so an element can
/// be matched to the document it came from even when ids repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey(u64);

impl DocumentKey {
    /// A key no other document has been given.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        DocumentKey(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A document that can hold annotations.
///
/// Hosts may bring their own document types; the processing facade only
/// accepts [`ParseDocument`] and uses [`Document::into_any`] to check.
pub trait Document: Any + fmt::Debug {
    fn document_id(&self) -> &str;

    fn document_key(&self) -> DocumentKey;

    /// Store `annotation` for `element`, after any earlier ones.
    fn record_annotation(&mut self, element: ElementRef, annotation: Annotation);

    /// Annotations recorded for `element`, oldest first.
    fn annotations(&self, element: &ElementRef) -> &[Annotation];

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Words, phrases, sentences and coreference chains of one analyzed text.
///
/// All views are materialized once from the graph when the document is
/// created and are read-only afterwards; only annotations change.
pub struct ParseDocument {
    id: String,
    key: DocumentKey,
    graph: ParseGraph,
    words: Vec<ParseWord>,
    phrases: Vec<ParsePhrase>,
    sentences: Vec<ParseSentence>,
    coreferences: Vec<ParseCoreference>,
    annotations: BTreeMap<ElementRef, Vec<Annotation>>,
}

impl fmt::Debug for ParseDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseDocument")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("word_count", &self.words.len())
            .field("phrase_count", &self.phrases.len())
            .field("sentence_count", &self.sentences.len())
            .field("coreference_count", &self.coreferences.len())
            .finish()
    }
}

impl ParseDocument {
    /// Build the document view of `graph`.
    pub fn new(graph: ParseGraph, id: impl Into<String>) -> Self {
        let key = DocumentKey::fresh();
        let words: Vec<ParseWord> = graph
            .token_nodes()
            .into_iter()
            .enumerate()
            .map(|(idx, node)| ParseWord::from_node(node, idx, key))
            .collect();
        let phrases = collect_phrases(&graph, &words, key);
        let sentences = split_sentences(&words, &phrases, key);
        let coreferences = resolve_chains(&graph, &words, &phrases);

        let id = id.into();
        log::debug!(
            "document '{}': {} words, {} phrases, {} sentences, {} coreference chains",
            id,
            words.len(),
            phrases.len(),
            sentences.len(),
            coreferences.len()
        );

        ParseDocument {
            id,
            key,
            graph,
            words,
            phrases,
            sentences,
            coreferences,
            annotations: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> DocumentKey {
        self.key
    }

    pub fn graph(&self) -> &ParseGraph {
        &self.graph
    }

    /// All words in document order.
    pub fn words(&self) -> &[ParseWord] {
        &self.words
    }

    /// Words tagged as named entities, in document order.
    pub fn named_entity_words(&self) -> Vec<&ParseWord> {
        self.words.iter().filter(|w| w.is_named_entity()).collect()
    }

    /// All phrases in document order.
    pub fn phrases(&self) -> &[ParsePhrase] {
        &self.phrases
    }

    pub fn noun_phrases(&self) -> Vec<&ParsePhrase> {
        self.phrases.iter().filter(|p| p.is_noun_phrase()).collect()
    }

    pub fn sentences(&self) -> &[ParseSentence] {
        &self.sentences
    }

    pub fn coreferences(&self) -> &[ParseCoreference] {
        &self.coreferences
    }

    /// First phrase, in document order, that contains `word`.
    pub fn phrase_of_word(&self, word: &ParseWord) -> Option<&ParsePhrase> {
        self.phrases.iter().find(|phrase| phrase.contains_word(word))
    }

    pub fn word_at(&self, position: usize) -> Option<&ParseWord> {
        self.words.iter().find(|w| w.position() == position)
    }

    /// Every recorded annotation, grouped by element in element order.
    pub fn all_annotations(&self) -> impl Iterator<Item = (&ElementRef, &[Annotation])> {
        self.annotations
            .iter()
            .map(|(element, annotations)| (element, annotations.as_slice()))
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.values().map(Vec::len).sum()
    }

    /// Display text of an element of this document.
    pub fn element_text(&self, element: &ElementRef) -> Option<String> {
        match element {
            ElementRef::Word(node) => self
                .words
                .iter()
                .find(|w| w.node() == *node)
                .map(|w| w.text().to_string()),
            ElementRef::Phrase(node) => self
                .phrases
                .iter()
                .find(|p| p.node() == *node)
                .map(ParsePhrase::text),
            ElementRef::Sentence(index) => self.sentences.get(*index).map(ParseSentence::text),
        }
    }
}

impl Document for ParseDocument {
    fn document_id(&self) -> &str {
        &self.id
    }

    fn document_key(&self) -> DocumentKey {
        self.key
    }

    fn record_annotation(&mut self, element: ElementRef, annotation: Annotation) {
        self.annotations.entry(element).or_default().push(annotation);
    }

    fn annotations(&self, element: &ElementRef) -> &[Annotation] {
        self.annotations
            .get(element)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Phrase nodes in document order: by first member word, node id for ties.
/// Phrases without any word member are dropped.
fn collect_phrases(
    graph: &ParseGraph,
    words: &[ParseWord],
    key: DocumentKey,
) -> Vec<ParsePhrase> {
    let word_index: HashMap<NodeId, usize> = words
        .iter()
        .enumerate()
        .map(|(idx, word)| (word.node(), idx))
        .collect();

    let mut phrases = Vec::new();
    for node in graph.nodes_of_type(node_type::PHRASE) {
        let mut members: Vec<ParseWord> = graph
            .targets_of::<PhraseMember>(node.id())
            .into_iter()
            .filter_map(|member| word_index.get(&member))
            .map(|&idx| words[idx].clone())
            .collect();
        if members.is_empty() {
            log::debug!("skipping phrase node {:?} without words", node.id());
            continue;
        }
        members.sort_by_key(ParseWord::position);
        let kind = PhraseKind::from_label(node.text(attr::KIND).unwrap_or_default());
        phrases.push(ParsePhrase::new(node.id(), kind, members, key));
    }
    phrases.sort_by_key(|phrase| (phrase.first_position(), phrase.node()));
    phrases
}

/// Split the word sequence wherever the sentence index changes, so
/// sentences are contiguous and cover every word exactly once.
fn split_sentences(
    words: &[ParseWord],
    phrases: &[ParsePhrase],
    key: DocumentKey,
) -> Vec<ParseSentence> {
    let mut groups: Vec<Vec<ParseWord>> = Vec::new();
    for word in words {
        match groups.last_mut() {
            Some(group) if group.last().map(ParseWord::sentence) == Some(word.sentence()) => {
                group.push(word.clone())
            }
            _ => groups.push(vec![word.clone()]),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(index, group)| {
            let first = group.first().map(ParseWord::position);
            let last = group.last().map(ParseWord::position);
            let starting_inside = phrases
                .iter()
                .filter(|phrase| {
                    let start = phrase.first_position();
                    start >= first && start <= last
                })
                .cloned()
                .collect();
            ParseSentence::new(index, group, starting_inside, key)
        })
        .collect()
}
