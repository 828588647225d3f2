use std::any::Any;

use layered_parse::{PipelineError, PipelineRuntime, PrePipelineData, RuntimeConfig, Stage, Tagger};
use layered_parse_document::{
    Annotation, Document, DocumentKey, ElementRef, ParseDocument, TextElement,
};

use crate::{
    InitOutcome, NaturalLanguageProcessing, ParseProcessing, ProcessingConfig, ProcessingError,
    UNKNOWN_DOCUMENT_ID,
};

/// A document type the facade does not understand.
#[derive(Debug)]
struct PlainDocument(DocumentKey);

impl Document for PlainDocument {
    fn document_id(&self) -> &str {
        "plain"
    }

    fn document_key(&self) -> DocumentKey {
        self.0
    }

    fn record_annotation(&mut self, _element: ElementRef, _annotation: Annotation) {}

    fn annotations(&self, _element: &ElementRef) -> &[Annotation] {
        &[]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Leaves every token untagged.
struct SilentTagger;

impl Tagger for SilentTagger {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn exec(&self, _data: &mut PrePipelineData) -> Result<(), PipelineError> {
        Ok(())
    }
}

fn texts(nlp: &ParseProcessing) -> Vec<String> {
    nlp.words()
        .unwrap()
        .iter()
        .map(|w| w.text().to_string())
        .collect()
}

fn ready(nlp: &mut ParseProcessing, text: &str, id: Option<&str>) {
    let outcome = nlp.init_from_text(Some(text), id).unwrap();
    assert_eq!(outcome, InitOutcome::Ready);
}

#[test]
fn test_default_document_id() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "hello world", None);
    assert_eq!(nlp.document().unwrap().document_id(), UNKNOWN_DOCUMENT_ID);
    assert_eq!(texts(&nlp), ["hello", "world"]);

    insta::assert_snapshot!(nlp.debug_summary().unwrap(), @r###"
    Document "UNKNOWN"
      words: 2
      named-entity words: 0
      sentences: 1
      phrases: 1 (1 noun phrases)
      coreference chains: 0
      annotations: 0
    "###);
}

#[test]
fn test_queries_before_init() {
    let nlp = ParseProcessing::new();
    assert!(!nlp.has_document());
    assert_eq!(nlp.words().unwrap_err(), ProcessingError::NoDocument);
    assert_eq!(nlp.phrases().unwrap_err(), ProcessingError::NoDocument);
    assert_eq!(nlp.sentences().unwrap_err(), ProcessingError::NoDocument);
    assert_eq!(nlp.coreferences().unwrap_err(), ProcessingError::NoDocument);
    assert!(nlp.document().is_err());
    assert!(nlp.debug_summary().is_err());
    assert!(nlp.runtime().is_none());
}

#[test]
fn test_absent_text_keeps_document() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "The server stores data.", Some("doc0"));

    let err = nlp.init_from_text(None, Some("doc1")).unwrap_err();
    assert!(matches!(err, ProcessingError::InvalidArgument(_)));
    assert_eq!(nlp.document().unwrap().document_id(), "doc0");
    assert_eq!(texts(&nlp), ["The", "server", "stores", "data", "."]);
}

#[test]
fn test_reinit_replaces_document() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "The server stores data.", Some("first"));
    let word = nlp.words().unwrap()[1].clone();
    nlp.annotate(&word, Annotation::new("component")).unwrap();

    ready(&mut nlp, "Users read reports.", Some("second"));
    assert_eq!(nlp.document().unwrap().document_id(), "second");
    assert_eq!(texts(&nlp), ["Users", "read", "reports", "."]);
    assert_eq!(nlp.current_document().unwrap().annotation_count(), 0);
}

#[test]
fn test_stale_element_is_refused() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "The server stores data.", Some("first"));
    let stale_word = nlp.words().unwrap()[1].clone();
    let stale_sentence = nlp.sentences().unwrap()[0].clone();

    ready(&mut nlp, "Users read reports.", Some("second"));
    let err = nlp
        .annotate(&stale_word, Annotation::new("component"))
        .unwrap_err();
    assert_eq!(
        err,
        ProcessingError::InvalidArgument(
            "Word[server] does not belong to document 'second'".to_string()
        )
    );
    assert!(matches!(
        nlp.annotate(&stale_sentence, Annotation::new("requirement")),
        Err(ProcessingError::InvalidArgument(_))
    ));

    let document = nlp.current_document().unwrap();
    assert_eq!(document.annotation_count(), 0);
    assert!(document.annotations(&stale_word.element_ref()).is_empty());

    // elements of the current document are still accepted
    let word = nlp.words().unwrap()[1].clone();
    nlp.annotate(&word, Annotation::new("action")).unwrap();
    assert_eq!(nlp.current_document().unwrap().annotation_count(), 1);
}

#[test]
fn test_document_xor_failure() {
    let mut nlp = ParseProcessing::new();
    for text in ["The server stores data.", "", "Alice met Bob.", " \t\n", "ok"] {
        let outcome = nlp.init_from_text(Some(text), Some("doc")).unwrap();
        match outcome {
            InitOutcome::Ready => {
                assert!(nlp.has_document());
                assert!(!nlp.words().unwrap().is_empty());
            }
            InitOutcome::NoDocument(err) => {
                assert_eq!(err.failed_stage(), Stage::Hypothesis);
                assert!(!nlp.has_document());
                assert_eq!(nlp.words().unwrap_err(), ProcessingError::NoDocument);
            }
        }
    }
}

#[test]
fn test_pipeline_failure_clears_stale_document() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "The server stores data.", Some("doc0"));

    let outcome = nlp.init_from_text(Some("   "), Some("doc1")).unwrap();
    assert!(!outcome.is_ready());
    assert_eq!(outcome.error().map(|e| e.failed_stage()), Some(Stage::Hypothesis));
    assert!(!nlp.has_document());
}

#[test]
fn test_missing_data_is_reported() {
    let runtime = PipelineRuntime::builder(RuntimeConfig::default())
        .tagger(|| Box::new(SilentTagger))
        .build();
    let mut nlp = ParseProcessing::with_runtime(runtime);

    let outcome = nlp.init_from_text(Some("hello world"), None).unwrap();
    match outcome {
        InitOutcome::NoDocument(err) => assert!(err.is_missing_data()),
        InitOutcome::Ready => panic!("untagged tokens must not produce a document"),
    }
    assert!(!nlp.has_document());
}

#[test]
fn test_runtime_is_reused() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "First text.", None);
    let runtime = nlp.runtime().unwrap() as *const PipelineRuntime;
    ready(&mut nlp, "Second text.", None);
    assert_eq!(nlp.runtime().unwrap() as *const PipelineRuntime, runtime);
    assert!(nlp.runtime().unwrap().is_initialized());
}

#[test]
fn test_init_from_document() {
    let graph = PipelineRuntime::default().run("Alice reads it.").unwrap();
    let mut nlp = ParseProcessing::new();
    nlp.init_from_document(Box::new(ParseDocument::new(graph, "prebuilt")))
        .unwrap();
    assert_eq!(nlp.document().unwrap().document_id(), "prebuilt");
    assert_eq!(texts(&nlp), ["Alice", "reads", "it", "."]);
    // adopting a document does not build the pipeline
    assert!(nlp.runtime().is_none());
}

#[test]
fn test_init_from_document_replaces_text_document() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "The server stores data.", Some("from-text"));
    let old_word = nlp.words().unwrap()[1].clone();
    nlp.annotate(&old_word, Annotation::new("component")).unwrap();

    let graph = nlp.runtime().unwrap().run("Alice reads it.").unwrap();
    nlp.init_from_document(Box::new(ParseDocument::new(graph, "prebuilt")))
        .unwrap();

    assert_eq!(nlp.document().unwrap().document_id(), "prebuilt");
    assert_eq!(texts(&nlp), ["Alice", "reads", "it", "."]);
    assert_eq!(nlp.current_document().unwrap().annotation_count(), 0);
    assert_eq!(nlp.phrase_of_word(&old_word).unwrap(), None);
    assert!(nlp.annotate(&old_word, Annotation::new("x")).is_err());
}

#[test]
fn test_foreign_document_is_rejected() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "hello world", Some("kept"));

    let err = nlp.init_from_document(Box::new(PlainDocument(DocumentKey::fresh()))).unwrap_err();
    assert_eq!(
        err,
        ProcessingError::InvalidArgument("Invalid document type. Need ParseDocument".to_string())
    );
    assert_eq!(nlp.document().unwrap().document_id(), "kept");
}

#[test]
fn test_annotate() {
    let mut nlp = ParseProcessing::new();
    assert_eq!(
        nlp.annotate(&DetachedElement, Annotation::new("x")).unwrap_err(),
        ProcessingError::NoDocument
    );

    ready(&mut nlp, "The server stores data. It never fails.", Some("doc"));
    let phrase = nlp.noun_phrases().unwrap()[0].clone();
    let sentence = nlp.sentences().unwrap()[1].clone();
    nlp.annotate(&phrase, Annotation::with_value("role", "subject"))
        .unwrap();
    nlp.annotate(&sentence, Annotation::new("requirement")).unwrap();

    let document = nlp.document().unwrap();
    assert_eq!(
        document.annotations(&phrase.element_ref()),
        [Annotation::with_value("role", "subject")]
    );
    assert_eq!(
        document.annotations(&ElementRef::Sentence(1)),
        [Annotation::new("requirement")]
    );
}

/// An element that only exists to exercise the no-document guard.
struct DetachedElement;

impl std::fmt::Display for DetachedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("nothing")
    }
}

impl TextElement for DetachedElement {
    fn element_ref(&self) -> ElementRef {
        ElementRef::Sentence(0)
    }

    fn document_key(&self) -> DocumentKey {
        DocumentKey::fresh()
    }
}

#[test]
fn test_phrase_of_word() {
    let mut nlp = ParseProcessing::new();
    ready(&mut nlp, "The server stores data.", None);
    let words = nlp.words().unwrap().to_vec();

    let phrase = nlp.phrase_of_word(&words[1]).unwrap().unwrap();
    assert_eq!(phrase.text(), "The server");
    assert_eq!(nlp.phrase_of_word(&words[4]).unwrap(), None);
}

#[test]
fn test_from_config_runs_agents() {
    let config =
        ProcessingConfig::from_toml_str("[pipeline]\nagents = [\"coreference\"]\n").unwrap();
    let mut nlp = ParseProcessing::from_config(config);
    ready(&mut nlp, "The server stores the files. It replicates them.", None);

    let chains: Vec<String> = nlp
        .coreferences()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(chains, ["The server -> It", "the files -> them"]);
    assert!(nlp.named_entity_words().unwrap().is_empty());
}
