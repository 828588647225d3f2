//! Second pipeline stage: linguistic tagging of the main hypothesis.
//!
//! The [`Tagger`] trait is the seam for any tokenizer/tagger engine. The
//! bundled [`RuleTagger`] assigns, per token:
//! - a sentence index (punctuation + abbreviation list)
//! - a Penn Treebank part-of-speech tag (lexicon, suffix and context rules)
//! - an IOB chunk tag (`B-NP`, `I-VP`, `O`, ...)
//! - a named-entity label (`PERSON`, `ORGANIZATION`, `LOCATION`, `MISC`, or `O`)

mod chunker;
mod entity;
mod lexicon;
mod sentence;

pub use chunker::{ChunkTag, Iob};

use std::ops::Range;

use crate::config::TaggerConfig;
use crate::error::{PipelineError, Stage};
use crate::pre_pipeline::PrePipelineData;

use chunker::Chunker;
use lexicon::PosLexicon;
use sentence::SentenceSplitter;

/// Named-entity label of tokens outside any entity.
pub const NER_OUTSIDE: &str = "O";

/// A heavyweight engine that annotates the main hypothesis with linguistic
/// features.
///
/// `init` runs once, right after the engine is created; `exec` runs once
/// per pipeline run and must tag every token.
pub trait Tagger {
    fn name(&self) -> &'static str;

    fn init(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }

    fn exec(&self, data: &mut PrePipelineData) -> Result<(), PipelineError>;
}

struct TaggerModels {
    lexicon: PosLexicon,
    splitter: SentenceSplitter,
    chunker: Chunker,
}

/// Rule-based tagger bundled with the pipeline.
pub struct RuleTagger {
    config: TaggerConfig,
    models: Option<TaggerModels>,
}

impl RuleTagger {
    pub fn new(config: TaggerConfig) -> Self {
        RuleTagger {
            config,
            models: None,
        }
    }
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new(TaggerConfig::default())
    }
}

impl Tagger for RuleTagger {
    fn name(&self) -> &'static str {
        "rule-tagger"
    }

    fn init(&mut self) -> Result<(), PipelineError> {
        if self.models.is_some() {
            return Ok(());
        }
        let lexicon = PosLexicon::load()
            .map_err(|err| PipelineError::stage(Stage::Tagging, err.to_string()))?;
        self.models = Some(TaggerModels {
            lexicon,
            splitter: SentenceSplitter::new()
                .with_custom_abbreviations(&self.config.extra_abbreviations),
            chunker: Chunker::new(self.config.include_determiners),
        });
        Ok(())
    }

    fn exec(&self, data: &mut PrePipelineData) -> Result<(), PipelineError> {
        let models = self
            .models
            .as_ref()
            .ok_or_else(|| PipelineError::stage(Stage::Tagging, "tagger used before init"))?;

        let hypothesis = data.main_hypothesis_mut(Stage::Tagging)?;
        if hypothesis.is_empty() {
            return Err(PipelineError::stage(Stage::Tagging, "hypothesis has no tokens"));
        }

        let texts: Vec<String> = hypothesis.tokens().iter().map(|t| t.text.clone()).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

        let sentences = models.splitter.assign(&refs);
        let mut pos_tags = Vec::with_capacity(refs.len());
        let mut chunks = Vec::with_capacity(refs.len());
        let mut entities = Vec::with_capacity(refs.len());

        let ranges = sentence_ranges(&sentences);
        for range in ranges.iter().cloned() {
            let slice = &refs[range];
            let tags = models.lexicon.tag_sentence(slice);
            chunks.extend(models.chunker.chunk(&tags));
            entities.extend(entity::tag_entities(slice, &tags));
            pos_tags.extend(tags);
        }

        for (idx, token) in hypothesis.tokens_mut().iter_mut().enumerate() {
            token.sentence = Some(sentences[idx]);
            token.pos = Some(pos_tags[idx].clone());
            token.chunk = Some(chunks[idx].clone());
            token.ner = Some(entities[idx].clone());
        }

        log::debug!(
            "{} tagged {} tokens in {} sentences",
            self.name(),
            refs.len(),
            ranges.len()
        );
        Ok(())
    }
}

/// Contiguous token ranges sharing a sentence index.
fn sentence_ranges(sentences: &[usize]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for idx in 1..=sentences.len() {
        if idx == sentences.len() || sentences[idx] != sentences[start] {
            if start < idx {
                ranges.push(start..idx);
            }
            start = idx;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothesis::string_to_main_hypothesis;

    fn tagged(text: &str) -> PrePipelineData {
        let mut tagger = RuleTagger::default();
        tagger.init().unwrap();
        let mut data = PrePipelineData::new();
        data.set_main_hypothesis(string_to_main_hypothesis(text, true).unwrap());
        tagger.exec(&mut data).unwrap();
        data
    }

    #[test]
    fn test_every_token_is_tagged() {
        let data = tagged("The server stores data. Alice reads it.");
        let hypothesis = data.main_hypothesis(Stage::Tagging).unwrap();
        assert!(hypothesis.tokens().iter().all(|t| t.is_tagged()));

        let sentences: Vec<usize> = hypothesis
            .tokens()
            .iter()
            .filter_map(|t| t.sentence)
            .collect();
        assert_eq!(sentences, [0, 0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_features() {
        let data = tagged("Acme Corp ships parts.");
        let hypothesis = data.main_hypothesis(Stage::Tagging).unwrap();
        let rows: Vec<(String, String, String, String)> = hypothesis
            .tokens()
            .iter()
            .map(|t| {
                (
                    t.text.clone(),
                    t.pos.clone().unwrap(),
                    t.chunk.as_ref().unwrap().to_string(),
                    t.ner.clone().unwrap(),
                )
            })
            .collect();

        let expected = [
            ("Acme", "NNP", "B-NP", "ORGANIZATION"),
            ("Corp", "NNP", "I-NP", "ORGANIZATION"),
            ("ships", "VBZ", "B-VP", "O"),
            ("parts", "NNS", "B-NP", "O"),
            (".", ".", "O", "O"),
        ];
        assert_eq!(rows.len(), expected.len());
        for (row, exp) in rows.iter().zip(expected.iter()) {
            assert_eq!(
                (row.0.as_str(), row.1.as_str(), row.2.as_str(), row.3.as_str()),
                *exp
            );
        }
    }

    #[test]
    fn test_exec_before_init_fails() {
        let tagger = RuleTagger::default();
        let mut data = PrePipelineData::new();
        data.set_main_hypothesis(string_to_main_hypothesis("hello", true).unwrap());
        let err = tagger.exec(&mut data).unwrap_err();
        assert_eq!(err.failed_stage(), Stage::Tagging);
        assert!(!err.is_missing_data());
    }

    #[test]
    fn test_missing_hypothesis() {
        let mut tagger = RuleTagger::default();
        tagger.init().unwrap();
        let err = tagger.exec(&mut PrePipelineData::new()).unwrap_err();
        assert!(err.is_missing_data());
    }

    #[test]
    fn test_sentence_ranges() {
        assert_eq!(sentence_ranges(&[0, 0, 1, 1, 1, 2]), vec![0..2, 2..5, 5..6]);
        assert!(sentence_ranges(&[]).is_empty());
    }
}
