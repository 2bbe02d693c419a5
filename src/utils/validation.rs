// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{PipelineError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PipelineError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_output_file(path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(PipelineError::Validation(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }

        if path.file_name().is_none() {
            return Err(PipelineError::Validation(format!(
                "Output path has no file name: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Shortens `text` to at most `max_chars` characters, appending `...`.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}
