// file: src/exporter/mod.rs
// description: dataset output module exports
// reference: internal module structure

pub mod manifest;
pub mod parquet_writer;

pub use manifest::RunManifest;
pub use parquet_writer::{ExportSummary, ParquetExporter, ParquetSummary, dataset_schema};
