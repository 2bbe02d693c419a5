// file: src/parser/mod.rs
// description: raw email decoding and parsing module exports
// reference: internal module structure

pub mod email;
pub mod encoding;

pub use email::EmailParser;
pub use encoding::{decode_latin1, normalize_newlines};
