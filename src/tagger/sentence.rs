//! Sentence boundary detection over hypothesis tokens.
//!
//! A sentence ends at a period, question mark or exclamation point, unless
//! the preceding token is a known abbreviation (e.g., "Dr.", "Inc.").
//! Runs of terminal punctuation ("?!") stay with the sentence they close.

use std::collections::HashSet;

#[derive(Debug, Clone)]
pub(crate) struct SentenceSplitter {
    abbreviations: HashSet<String>,
}

impl SentenceSplitter {
    pub(crate) fn new() -> Self {
        // Common abbreviations that should NOT be treated as sentence boundaries
        let common_abbrevs = [
            "dr", "mr", "mrs", "ms", "prof", "sr", "jr",
            "inc", "ltd", "corp", "co", "llc",
            "e.g", "i.e", "vs", "etc", "approx",
            "u.s", "u.k", "p.m", "a.m",
            "st", "ave", "blvd", "dept", "fig",
        ];

        SentenceSplitter {
            abbreviations: common_abbrevs.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub(crate) fn with_custom_abbreviations<S: AsRef<str>>(mut self, abbreviations: &[S]) -> Self {
        for abbrev in abbreviations {
            self.abbreviations
                .insert(abbrev.as_ref().trim_end_matches('.').to_lowercase());
        }
        self
    }

    fn is_abbreviation(&self, text: &str) -> bool {
        let normalized = text.trim_end_matches('.').to_lowercase();
        self.abbreviations.contains(&normalized)
    }

    /// Sentence index for every token.
    pub(crate) fn assign(&self, tokens: &[&str]) -> Vec<usize> {
        let mut sentences = Vec::with_capacity(tokens.len());
        let mut current = 0;
        let mut pending_break = false;

        for (idx, text) in tokens.iter().enumerate() {
            if pending_break && !is_sentence_ending_punctuation(text) {
                current += 1;
                pending_break = false;
            }
            sentences.push(current);

            if is_sentence_ending_punctuation(text) {
                let after_abbreviation = idx
                    .checked_sub(1)
                    .map_or(false, |prev| self.is_abbreviation(tokens[prev]));
                if !after_abbreviation {
                    pending_break = true;
                }
            }
        }

        sentences
    }
}

fn is_sentence_ending_punctuation(text: &str) -> bool {
    matches!(text, "." | "?" | "!")
}
