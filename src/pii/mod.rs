// file: src/pii/mod.rs
// description: pii detection and anonymization module exports
// reference: internal module structure

pub mod analyzer;
pub mod anonymizer;
pub mod patterns;
pub mod recognizer;
pub mod redactor;
pub mod validators;

pub use analyzer::{AnalyzeError, AnalyzerEngine, MAX_TEXT_CHARS};
pub use anonymizer::{AnonymizeError, AnonymizerEngine, REDACTION_TOKEN};
pub use recognizer::{PatternRecognizer, Recognizer};
pub use redactor::{PiiError, PiiRedactor};
