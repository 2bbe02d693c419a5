// file: src/corpus/mod.rs
// description: email corpus discovery module exports
// reference: internal module structure

pub mod scanner;

pub use scanner::{FileScanner, ScanReport, ScannedFile};
