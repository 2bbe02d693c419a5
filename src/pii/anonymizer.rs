// file: src/pii/anonymizer.rs
// description: replaces detected pii spans with a fixed redaction token
// reference: span replacement with overlap merging

use crate::models::RecognizerResult;
use thiserror::Error;

pub const REDACTION_TOKEN: &str = "<REDACTED>";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnonymizeError {
    #[error("span {start}..{end} is invalid for text of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },
}

#[derive(Debug, Clone, Default)]
pub struct AnonymizerEngine;

impl AnonymizerEngine {
    pub fn new() -> Self {
        Self
    }

    /// Overlapping or nested spans collapse into one token; touching spans
    /// keep a token each.
    pub fn anonymize(
        &self,
        text: &str,
        results: &[RecognizerResult],
    ) -> Result<String, AnonymizeError> {
        for result in results {
            if result.start >= result.end
                || result.end > text.len()
                || !text.is_char_boundary(result.start)
                || !text.is_char_boundary(result.end)
            {
                return Err(AnonymizeError::InvalidSpan {
                    start: result.start,
                    end: result.end,
                    len: text.len(),
                });
            }
        }

        let merged = merge_spans(results);

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end) in merged {
            output.push_str(&text[cursor..start]);
            output.push_str(REDACTION_TOKEN);
            cursor = end;
        }
        output.push_str(&text[cursor..]);

        Ok(output)
    }
}

fn merge_spans(results: &[RecognizerResult]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = results.iter().map(|r| (r.start, r.end)).collect();
    spans.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityType;
    use pretty_assertions::assert_eq;

    fn span(start: usize, end: usize) -> RecognizerResult {
        RecognizerResult::new(EntityType::Person, start, end, 0.8)
    }

    #[test]
    fn test_replaces_spans() {
        let text = "Call Ken at 713-853-6789 today";
        let output = AnonymizerEngine::new()
            .anonymize(text, &[span(5, 8), span(12, 24)])
            .unwrap();
        assert_eq!(output, "Call <REDACTED> at <REDACTED> today");
    }

    #[test]
    fn test_no_spans_is_identity() {
        let text = "nothing to hide";
        assert_eq!(AnonymizerEngine::new().anonymize(text, &[]).unwrap(), text);
    }

    #[test]
    fn test_overlapping_and_nested_spans_merge() {
        let text = "abcdefghij";
        let output = AnonymizerEngine::new()
            .anonymize(text, &[span(6, 9), span(1, 4), span(2, 6), span(3, 5)])
            .unwrap();
        assert_eq!(output, "a<REDACTED><REDACTED>j");
    }

    #[test]
    fn test_invalid_spans_are_rejected() {
        let engine = AnonymizerEngine::new();
        assert!(engine.anonymize("short", &[span(2, 10)]).is_err());
        assert!(engine.anonymize("short", &[span(3, 3)]).is_err());
        assert_eq!(
            engine.anonymize("café", &[span(0, 4)]),
            Err(AnonymizeError::InvalidSpan { start: 0, end: 4, len: 5 })
        );
    }
}
