//! The processing facade: text or a pre-built document in, document
//! queries and annotations out.

use once_cell::unsync::OnceCell;

use layered_parse::{PipelineError, PipelineRuntime, RuntimeConfig};
use layered_parse_document::{
    Annotation, Document, ParseCoreference, ParseDocument, ParsePhrase, ParseSentence, ParseWord,
    TextElement,
};

use crate::{ProcessingConfig, ProcessingError, ProcessingResult};

/// Id given to documents initialized from text without one.
pub const UNKNOWN_DOCUMENT_ID: &str = "UNKNOWN";

/// Result of initializing from text.
///
/// A pipeline failure is not an error of the call itself: the facade logs
/// it, drops the current document and reports it here.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A new document is current.
    Ready,
    /// The pipeline failed; no document is current.
    NoDocument(PipelineError),
}

impl InitOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, InitOutcome::Ready)
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match self {
            InitOutcome::Ready => None,
            InitOutcome::NoDocument(err) => Some(err),
        }
    }
}

/// Uniform query and annotation surface over one current document.
///
/// Every query fails with [`ProcessingError::NoDocument`] until an `init_*`
/// call has produced a document.
pub trait NaturalLanguageProcessing {
    /// Adopt a pre-built document, replacing the current one.
    fn init_from_document(&mut self, document: Box<dyn Document>) -> ProcessingResult<()>;

    /// Analyze `text` and make the result the current document.
    fn init_from_text(
        &mut self,
        text: Option<&str>,
        document_id: Option<&str>,
    ) -> ProcessingResult<InitOutcome>;

    fn has_document(&self) -> bool;

    fn document(&self) -> ProcessingResult<&dyn Document>;

    fn words(&self) -> ProcessingResult<&[ParseWord]>;

    fn named_entity_words(&self) -> ProcessingResult<Vec<&ParseWord>>;

    fn phrases(&self) -> ProcessingResult<&[ParsePhrase]>;

    fn noun_phrases(&self) -> ProcessingResult<Vec<&ParsePhrase>>;

    fn sentences(&self) -> ProcessingResult<&[ParseSentence]>;

    fn coreferences(&self) -> ProcessingResult<&[ParseCoreference]>;

    fn phrase_of_word(&self, word: &ParseWord) -> ProcessingResult<Option<&ParsePhrase>>;

    fn debug_summary(&self) -> ProcessingResult<String>;

    fn extensive_debug_summary(&self) -> ProcessingResult<String>;

    /// Apply `annotation` to `element` within the current document.
    ///
    /// Elements read from any other document are refused with
    /// [`ProcessingError::InvalidArgument`].
    fn annotate(&mut self, element: &dyn TextElement, annotation: Annotation)
        -> ProcessingResult<()>;
}

/// [`NaturalLanguageProcessing`] backed by the layered-parse pipeline.
///
/// The pipeline runtime is built on first use of
/// [`init_from_text`](NaturalLanguageProcessing::init_from_text) and kept
/// for every later call.
#[derive(Debug, Default)]
pub struct ParseProcessing {
    config: RuntimeConfig,
    runtime: OnceCell<PipelineRuntime>,
    document: Option<ParseDocument>,
}

impl ParseProcessing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ProcessingConfig) -> Self {
        ParseProcessing {
            config: config.pipeline,
            runtime: OnceCell::new(),
            document: None,
        }
    }

    /// Use an already built runtime, e.g. one with custom engines.
    pub fn with_runtime(runtime: PipelineRuntime) -> Self {
        ParseProcessing {
            config: runtime.config().clone(),
            runtime: OnceCell::with_value(runtime),
            document: None,
        }
    }

    /// The runtime, once it has been built.
    pub fn runtime(&self) -> Option<&PipelineRuntime> {
        self.runtime.get()
    }

    pub fn current_document(&self) -> Option<&ParseDocument> {
        self.document.as_ref()
    }

    fn current(&self) -> ProcessingResult<&ParseDocument> {
        self.document.as_ref().ok_or(ProcessingError::NoDocument)
    }
}

impl NaturalLanguageProcessing for ParseProcessing {
    fn init_from_document(&mut self, document: Box<dyn Document>) -> ProcessingResult<()> {
        let document = document.into_any().downcast::<ParseDocument>().map_err(|_| {
            ProcessingError::InvalidArgument(
                "Invalid document type. Need ParseDocument".to_string(),
            )
        })?;
        log::debug!("adopting document '{}'", document.id());
        self.document = Some(*document);
        Ok(())
    }

    fn init_from_text(
        &mut self,
        text: Option<&str>,
        document_id: Option<&str>,
    ) -> ProcessingResult<InitOutcome> {
        let text = text
            .ok_or_else(|| ProcessingError::InvalidArgument("text must be present".to_string()))?;
        let id = document_id.unwrap_or(UNKNOWN_DOCUMENT_ID);

        let runtime = self
            .runtime
            .get_or_init(|| PipelineRuntime::new(self.config.clone()));
        match runtime.run(text) {
            Ok(graph) => {
                self.document = Some(ParseDocument::new(graph, id));
                Ok(InitOutcome::Ready)
            }
            Err(err) => {
                log::warn!("could not build document '{}': {}", id, err);
                self.document = None;
                Ok(InitOutcome::NoDocument(err))
            }
        }
    }

    fn has_document(&self) -> bool {
        self.document.is_some()
    }

    fn document(&self) -> ProcessingResult<&dyn Document> {
        let document: &dyn Document = self.current()?;
        Ok(document)
    }

    fn words(&self) -> ProcessingResult<&[ParseWord]> {
        Ok(self.current()?.words())
    }

    fn named_entity_words(&self) -> ProcessingResult<Vec<&ParseWord>> {
        Ok(self.current()?.named_entity_words())
    }

    fn phrases(&self) -> ProcessingResult<&[ParsePhrase]> {
        Ok(self.current()?.phrases())
    }

    fn noun_phrases(&self) -> ProcessingResult<Vec<&ParsePhrase>> {
        Ok(self.current()?.noun_phrases())
    }

    fn sentences(&self) -> ProcessingResult<&[ParseSentence]> {
        Ok(self.current()?.sentences())
    }

    fn coreferences(&self) -> ProcessingResult<&[ParseCoreference]> {
        Ok(self.current()?.coreferences())
    }

    fn phrase_of_word(&self, word: &ParseWord) -> ProcessingResult<Option<&ParsePhrase>> {
        Ok(self.current()?.phrase_of_word(word))
    }

    fn debug_summary(&self) -> ProcessingResult<String> {
        Ok(self.current()?.debug_summary())
    }

    fn extensive_debug_summary(&self) -> ProcessingResult<String> {
        Ok(self.current()?.extensive_debug_summary())
    }

    fn annotate(
        &mut self,
        element: &dyn TextElement,
        annotation: Annotation,
    ) -> ProcessingResult<()> {
        let document = self.document.as_mut().ok_or(ProcessingError::NoDocument)?;
        log::debug!(
            "Annotating to {}[{}] the {}",
            element.kind(),
            element,
            annotation
        );
        element
            .annotate(document, annotation)
            .map_err(|err| ProcessingError::InvalidArgument(err.to_string()))
    }
}
