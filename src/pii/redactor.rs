// file: src/pii/redactor.rs
// description: analyze-then-anonymize wrapper with the pipeline's fallback policy

use crate::pii::analyzer::{AnalyzeError, AnalyzerEngine};
use crate::pii::anonymizer::{AnonymizeError, AnonymizerEngine};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PiiError {
    #[error("analysis failed: {0}")]
    Analyze(#[from] AnalyzeError),

    #[error("anonymization failed: {0}")]
    Anonymize(#[from] AnonymizeError),
}

pub struct PiiRedactor {
    analyzer: AnalyzerEngine,
    anonymizer: AnonymizerEngine,
}

impl PiiRedactor {
    pub fn new() -> Self {
        Self::with_engines(AnalyzerEngine::new(), AnonymizerEngine::new())
    }

    pub fn with_engines(analyzer: AnalyzerEngine, anonymizer: AnonymizerEngine) -> Self {
        Self {
            analyzer,
            anonymizer,
        }
    }

    pub fn redact(&self, text: &str) -> Result<String, PiiError> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let results = self.analyzer.analyze(text)?;
        let anonymized = self.anonymizer.anonymize(text, &results)?;
        Ok(anonymized)
    }

    /// On failure the input comes back unredacted and the flag is `false`.
    /// Callers must count these: the returned text may still carry PII.
    pub fn redact_or_original(&self, text: &str) -> (String, bool) {
        match self.redact(text) {
            Ok(redacted) => (redacted, true),
            Err(e) => {
                warn!("Anonymization failed for a text snippet: {}", e);
                (text.to_string(), false)
            }
        }
    }
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::new()
    }
}
