//! First pipeline stage: raw text to main hypothesis.
//!
//! A hypothesis is the working token sequence the tagger annotates in place.
//! Building it is a pure text transformation; no engine is involved.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{PipelineError, Stage};
use crate::tagger::ChunkTag;

/// One token of a hypothesis, plus the features taggers attach to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypothesisToken {
    /// Surface text
    pub text: String,
    /// Zero-based token index
    pub position: usize,
    /// Byte offset of the first character in the source text
    pub start: usize,
    /// Byte offset one past the last character in the source text
    pub end: usize,
    /// Part-of-speech tag, once tagged
    pub pos: Option<String>,
    /// Chunk tag (IOB + phrase kind), once tagged
    pub chunk: Option<ChunkTag>,
    /// Named-entity tag ("O" when the token is not an entity)
    pub ner: Option<String>,
    /// Sentence index, once sentence boundaries are known
    pub sentence: Option<usize>,
}

impl HypothesisToken {
    pub fn new(text: impl Into<String>, position: usize, start: usize, end: usize) -> Self {
        HypothesisToken {
            text: text.into(),
            position,
            start,
            end,
            pos: None,
            chunk: None,
            ner: None,
            sentence: None,
        }
    }

    /// True once every tagger-provided feature is present.
    pub fn is_tagged(&self) -> bool {
        self.pos.is_some() && self.chunk.is_some() && self.ner.is_some() && self.sentence.is_some()
    }
}

/// The working representation of raw text prior to tagging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hypothesis {
    tokens: Vec<HypothesisToken>,
}

impl Hypothesis {
    pub fn from_tokens(tokens: Vec<HypothesisToken>) -> Self {
        Hypothesis { tokens }
    }

    pub fn tokens(&self) -> &[HypothesisToken] {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut [HypothesisToken] {
        &mut self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The surface text of every token joined by single spaces.
    pub fn surface(&self) -> String {
        self.tokens
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Convert raw text into the main hypothesis.
///
/// With `split_punctuation`, tokens follow Unicode word boundaries so
/// punctuation becomes its own token ("data." -> "data", "."). Without it,
/// tokens are whitespace-separated runs.
///
/// Fails when the input contains no tokens at all.
pub fn string_to_main_hypothesis(
    input: &str,
    split_punctuation: bool,
) -> Result<Hypothesis, PipelineError> {
    let spans: Vec<(usize, &str)> = if split_punctuation {
        input
            .split_word_bound_indices()
            .filter(|(_, segment)| !segment.trim().is_empty())
            .collect()
    } else {
        input
            .split_whitespace()
            .map(|segment| (segment.as_ptr() as usize - input.as_ptr() as usize, segment))
            .collect()
    };

    if spans.is_empty() {
        return Err(PipelineError::stage(
            Stage::Hypothesis,
            "input contains no tokens",
        ));
    }

    let tokens = spans
        .into_iter()
        .enumerate()
        .map(|(position, (start, segment))| {
            HypothesisToken::new(segment, position, start, start + segment.len())
        })
        .collect();

    Ok(Hypothesis::from_tokens(tokens))
}
