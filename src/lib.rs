// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod cleaner;
pub mod config;
pub mod corpus;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pii;
pub mod pipeline;
pub mod utils;

pub use cleaner::BoilerplateCleaner;
pub use config::{Config, InputConfig, OutputConfig, PipelineConfig};
pub use corpus::{FileScanner, ScanReport, ScannedFile};
pub use error::{PipelineError, Result};
pub use exporter::{ExportSummary, ParquetExporter, ParquetSummary, RunManifest};
pub use models::{DatasetRow, EmailTable, ParsedEmail};
pub use parser::EmailParser;
pub use pii::{AnalyzerEngine, AnonymizerEngine, PiiRedactor, REDACTION_TOKEN};
pub use pipeline::{PipelineOrchestrator, PipelineStats, ProgressTracker};
pub use utils::Validator;
