// file: src/models/email.rs
// description: parsed email model produced by the parsing stage

use serde::{Deserialize, Serialize};

/// One source file that parsed successfully as an email message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmail {
    pub source_path: String,
    pub sender: Option<String>,
    pub body: String,
}

impl ParsedEmail {
    pub fn new(source_path: String, sender: Option<String>, body: String) -> Self {
        Self {
            source_path,
            sender,
            body,
        }
    }
}
