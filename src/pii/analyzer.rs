// file: src/pii/analyzer.rs
// description: runs the recognizer registry over text and collects pii spans
// reference: internal recognizer registry

use crate::models::RecognizerResult;
use crate::pii::recognizer::{Recognizer, default_recognizers};
use thiserror::Error;
use tracing::debug;

/// Longest text, in characters, the analyzer accepts.
pub const MAX_TEXT_CHARS: usize = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("text of {chars} characters exceeds the analyzer limit of {limit}")]
    TextTooLong { chars: usize, limit: usize },
}

pub struct AnalyzerEngine {
    recognizers: Vec<Box<dyn Recognizer>>,
    max_chars: usize,
}

impl AnalyzerEngine {
    pub fn new() -> Self {
        Self::with_recognizers(default_recognizers())
    }

    pub fn with_recognizers(recognizers: Vec<Box<dyn Recognizer>>) -> Self {
        Self {
            recognizers,
            max_chars: MAX_TEXT_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Results come back sorted by `(start, end)` with exact duplicates
    /// removed.
    pub fn analyze(&self, text: &str) -> Result<Vec<RecognizerResult>, AnalyzeError> {
        // byte length bounds char count from above
        if text.len() > self.max_chars {
            let chars = text.chars().count();
            if chars > self.max_chars {
                return Err(AnalyzeError::TextTooLong {
                    chars,
                    limit: self.max_chars,
                });
            }
        }

        let mut results: Vec<RecognizerResult> = self
            .recognizers
            .iter()
            .flat_map(|recognizer| recognizer.analyze(text))
            .collect();

        results.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then(b.score.total_cmp(&a.score))
        });
        results.dedup_by(|later, earlier| {
            later.start == earlier.start
                && later.end == earlier.end
                && later.entity_type == earlier.entity_type
        });

        debug!("Analyzer found {} candidate spans", results.len());
        Ok(results)
    }
}

impl Default for AnalyzerEngine {
    fn default() -> Self {
        Self::new()
    }
}
