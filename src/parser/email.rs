// file: src/parser/email.rs
// description: extracts sender and plain-text body from raw email files
// reference: https://docs.rs/mail-parser

use crate::corpus::ScannedFile;
use crate::error::{PipelineError, Result};
use crate::models::ParsedEmail;
use crate::parser::encoding::{decode_latin1, normalize_newlines};
use mail_parser::decoders::base64::base64_decode;
use mail_parser::decoders::quoted_printable::quoted_printable_decode;
use mail_parser::{Encoding, HeaderName, Message, MessageParser, MessagePart, MimeHeaders, PartType};
use std::fs;
use tracing::debug;

pub struct EmailParser {
    parser: MessageParser,
}

impl EmailParser {
    pub fn new() -> Self {
        Self {
            parser: MessageParser::default(),
        }
    }

    /// Only I/O errors fail; any readable file yields an email.
    pub fn parse_file(&self, file: &ScannedFile) -> Result<ParsedEmail> {
        let bytes = fs::read(&file.path).map_err(|source| PipelineError::FileOperation {
            path: file.path.clone(),
            source,
        })?;

        Ok(self.parse_bytes(&file.relative_path, &bytes))
    }

    /// Header values and bodies are decoded as Latin-1 after undoing the
    /// transfer encoding. Declared charsets are ignored. Input without a
    /// header block is kept whole as the body, with no sender.
    pub fn parse_bytes(&self, source_path: &str, raw: &[u8]) -> ParsedEmail {
        let Some(message) = self.parser.parse(raw) else {
            debug!("{} has no header block, keeping it as body text", source_path);
            return ParsedEmail::new(source_path.to_string(), None, decode_text(raw));
        };

        let sender = from_header(&message);

        let body = if is_multipart(&message) {
            first_plain_text(&message).unwrap_or_default()
        } else {
            message
                .parts
                .first()
                .map(|part| part_text(&message, part))
                .unwrap_or_default()
        };

        debug!(
            "Parsed {} (sender: {}, body: {} bytes)",
            source_path,
            sender.as_deref().unwrap_or("<none>"),
            body.len()
        );

        ParsedEmail::new(source_path.to_string(), sender, body)
    }
}

impl Default for EmailParser {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_text(bytes: &[u8]) -> String {
    normalize_newlines(&decode_latin1(bytes))
}

fn from_header(message: &Message<'_>) -> Option<String> {
    let header = message
        .headers()
        .iter()
        .find(|header| matches!(header.name, HeaderName::From))?;
    let raw = message
        .raw_message
        .get(header.offset_start..header.offset_end)?;
    unfold_header(&decode_latin1(raw))
}

/// Collapses folding whitespace; an all-blank header counts as absent.
fn unfold_header(raw: &str) -> Option<String> {
    let unfolded = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if unfolded.is_empty() {
        None
    } else {
        Some(unfolded)
    }
}

fn is_multipart(message: &Message<'_>) -> bool {
    matches!(
        message.parts.first().map(|part| &part.body),
        Some(PartType::Multipart(_)) | Some(PartType::Message(_))
    )
}

/// Depth-first search for the first `text/plain` part, descending into
/// attached messages.
fn first_plain_text(message: &Message<'_>) -> Option<String> {
    for part in &message.parts {
        match &part.body {
            PartType::Message(inner) => {
                if let Some(text) = first_plain_text(inner) {
                    return Some(text);
                }
            }
            PartType::Multipart(_) => {}
            _ if is_plain_text(part) => return Some(part_text(message, part)),
            _ => {}
        }
    }
    None
}

fn is_plain_text(part: &MessagePart<'_>) -> bool {
    match part.content_type() {
        Some(content_type) => {
            content_type.ctype().eq_ignore_ascii_case("text")
                && content_type
                    .subtype()
                    .is_some_and(|subtype| subtype.eq_ignore_ascii_case("plain"))
        }
        None => matches!(part.body, PartType::Text(_)),
    }
}

/// Offsets index the raw bytes of the message that owns the part.
fn part_text(message: &Message<'_>, part: &MessagePart<'_>) -> String {
    let raw = message
        .raw_message
        .get(part.offset_body..part.offset_end)
        .unwrap_or_default();

    let decoded = match part.encoding {
        Encoding::None => None,
        Encoding::QuotedPrintable => quoted_printable_decode(raw),
        Encoding::Base64 => base64_decode(raw),
    };

    decode_text(decoded.as_deref().unwrap_or(raw))
}
