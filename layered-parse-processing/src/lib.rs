//! Natural-language processing facade for layered-parse.
//!
//! [`ParseProcessing`] turns raw text (or a pre-built document) into the
//! current [`ParseDocument`](layered_parse_document::ParseDocument) and
//! answers queries and annotations against it.
//!
//! ## Example
//!
//! ```
//! use layered_parse_document::Document;
//! use layered_parse_processing::{NaturalLanguageProcessing, ParseProcessing};
//!
//! let mut nlp = ParseProcessing::new();
//! let outcome = nlp.init_from_text(Some("hello world"), None).unwrap();
//! assert!(outcome.is_ready());
//! assert_eq!(nlp.document().unwrap().document_id(), "UNKNOWN");
//!
//! let words: Vec<&str> = nlp.words().unwrap().iter().map(|w| w.text()).collect();
//! assert_eq!(words, ["hello", "world"]);
//! ```

mod config;
mod error;
mod processing;


pub use config::ProcessingConfig;
pub use error::{ConfigError, ProcessingError, ProcessingResult};
pub use processing::{
    InitOutcome, NaturalLanguageProcessing, ParseProcessing, UNKNOWN_DOCUMENT_ID,
};
