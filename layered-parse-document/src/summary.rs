//! Deterministic text dumps of a [`ParseDocument`].

use std::fmt;

use layered_parse::{attr, Coreference, ParseGraphDisplay};

use crate::ParseDocument;

/// Displays the debug dump of a document.
///
/// The short form lists the id and element counts. The extensive form adds
/// every sentence rendered with word tags, phrases and coreference arcs,
/// then the coreference chains and recorded annotations.
pub struct DocumentSummary<'a> {
    document: &'a ParseDocument,
    extensive: bool,
}

impl ParseDocument {
    pub fn summary(&self) -> DocumentSummary<'_> {
        DocumentSummary {
            document: self,
            extensive: false,
        }
    }

    pub fn extensive_summary(&self) -> DocumentSummary<'_> {
        DocumentSummary {
            document: self,
            extensive: true,
        }
    }

    /// Id and element counts.
    pub fn debug_summary(&self) -> String {
        self.summary().to_string()
    }

    /// [`debug_summary`](Self::debug_summary) plus the per-sentence
    /// rendering, coreference chains and annotations.
    pub fn extensive_debug_summary(&self) -> String {
        self.extensive_summary().to_string()
    }
}

impl DocumentSummary<'_> {
    fn fmt_counts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.document;
        writeln!(f, "Document {:?}", doc.id())?;
        writeln!(f, "  words: {}", doc.words().len())?;
        writeln!(f, "  named-entity words: {}", doc.named_entity_words().len())?;
        writeln!(f, "  sentences: {}", doc.sentences().len())?;
        writeln!(
            f,
            "  phrases: {} ({} noun phrases)",
            doc.phrases().len(),
            doc.noun_phrases().len()
        )?;
        writeln!(f, "  coreference chains: {}", doc.coreferences().len())?;
        writeln!(f, "  annotations: {}", doc.annotation_count())
    }

    fn fmt_sentences(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.document;
        for sentence in doc.sentences() {
            let (first, last) = match sentence.position_range() {
                Some(range) => range,
                None => continue,
            };
            writeln!(f)?;
            writeln!(f, "Sentence {}", sentence.index())?;
            let display = ParseGraphDisplay::for_positions(doc.graph(), first, last)
                .with_attr(attr::POS)
                .with_attr(attr::CHUNK_IOB)
                .with_attr(attr::NER)
                .with_phrases()
                .with_relation::<Coreference>();
            writeln!(f, "{}", display)?;
        }
        Ok(())
    }

    fn fmt_chains(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.document;
        if doc.coreferences().is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "Coreferences")?;
        for (idx, chain) in doc.coreferences().iter().enumerate() {
            writeln!(f, "  {}: {}", idx, chain)?;
        }
        Ok(())
    }

    fn fmt_annotations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc = self.document;
        if doc.annotation_count() == 0 {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "Annotations")?;
        for (element, annotations) in doc.all_annotations() {
            let text = doc.element_text(element).unwrap_or_default();
            for annotation in annotations {
                writeln!(f, "  {}[{}]: {}", element.kind(), text, annotation)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DocumentSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_counts(f)?;
        if self.extensive {
            self.fmt_sentences(f)?;
            self.fmt_chains(f)?;
            self.fmt_annotations(f)?;
        }
        Ok(())
    }
}
