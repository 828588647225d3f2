use std::fmt;

use crate::{DocumentKey, ParsePhrase, ParseWord};

/// One sentence: a contiguous run of words plus the phrases starting in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSentence {
    document: DocumentKey,
    index: usize,
    words: Vec<ParseWord>,
    phrases: Vec<ParsePhrase>,
}

impl ParseSentence {
    pub(crate) fn new(
        index: usize,
        words: Vec<ParseWord>,
        phrases: Vec<ParsePhrase>,
        document: DocumentKey,
    ) -> Self {
        ParseSentence {
            document,
            index,
            words,
            phrases,
        }
    }

    pub fn document(&self) -> DocumentKey {
        self.document
    }

    /// Zero-based sentence index within the document
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn words(&self) -> &[ParseWord] {
        &self.words
    }

    pub fn phrases(&self) -> &[ParsePhrase] {
        &self.phrases
    }

    /// Inclusive `(first, last)` word positions.
    pub fn position_range(&self) -> Option<(usize, usize)> {
        Some((self.words.first()?.position(), self.words.last()?.position()))
    }

    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.words.iter().map(ParseWord::text).collect();
        texts.join(" ")
    }
}

impl fmt::Display for ParseSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
