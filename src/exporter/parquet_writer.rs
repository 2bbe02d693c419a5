// file: src/exporter/parquet_writer.rs
// description: writes the anonymized {sender, text} dataset to a single parquet file
// reference: https://docs.rs/parquet

use crate::config::OutputConfig;
use crate::error::{PipelineError, Result};
use crate::models::DatasetRow;
use crate::utils::Validator;
use arrow_array::{Array, ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

pub fn dataset_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("sender", DataType::Utf8, true),
        Field::new("text", DataType::Utf8, false),
    ]))
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows_written: usize,
    pub batches_written: usize,
    pub file_size: u64,
}

#[derive(Debug, Clone)]
pub struct ParquetSummary {
    pub path: PathBuf,
    pub num_rows: usize,
    pub columns: Vec<String>,
    pub preview: Vec<DatasetRow>,
}

pub struct ParquetExporter {
    config: OutputConfig,
}

impl ParquetExporter {
    pub fn new(config: OutputConfig) -> Result<Self> {
        Validator::validate_output_file(&config.path)?;
        compression_from_name(&config.compression)?;
        Ok(Self { config })
    }

    /// Writes to `<path>.tmp` and renames over `<path>` once the footer is
    /// flushed, so a failed run never leaves a truncated file behind.
    /// `on_batch` receives the row count of each batch as it is written.
    pub fn write<F>(&self, rows: &[DatasetRow], mut on_batch: F) -> Result<ExportSummary>
    where
        F: FnMut(usize),
    {
        let final_path = self.config.path.clone();
        if let Some(parent) = final_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PipelineError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp_path = tmp_path_for(&final_path);
        let file = File::create(&tmp_path).map_err(|source| PipelineError::FileOperation {
            path: tmp_path.clone(),
            source,
        })?;

        let schema = dataset_schema();
        let props = WriterProperties::builder()
            .set_compression(compression_from_name(&self.config.compression)?)
            .build();
        let mut writer = ArrowWriter::try_new(BufWriter::new(file), schema.clone(), Some(props))?;

        let mut batches_written = 0;
        for chunk in rows.chunks(self.config.batch_size.max(1)) {
            let batch = build_record_batch(schema.clone(), chunk)?;
            writer.write(&batch)?;
            batches_written += 1;
            on_batch(chunk.len());
            debug!("Wrote batch {} ({} rows)", batches_written, chunk.len());
        }

        writer.close()?;

        fs::rename(&tmp_path, &final_path).map_err(|source| PipelineError::FileOperation {
            path: final_path.clone(),
            source,
        })?;

        let file_size = fs::metadata(&final_path).map(|m| m.len()).unwrap_or(0);

        info!(
            "Wrote {} rows in {} batches to {} ({} bytes)",
            rows.len(),
            batches_written,
            final_path.display(),
            file_size
        );

        Ok(ExportSummary {
            path: final_path,
            rows_written: rows.len(),
            batches_written,
            file_size,
        })
    }

    /// Row count, column names and up to `preview_rows` leading rows.
    pub fn read_summary(path: &Path, preview_rows: usize) -> Result<ParquetSummary> {
        let file = File::open(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let num_rows = builder.metadata().file_metadata().num_rows() as usize;
        let columns: Vec<String> = builder
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect();

        let mut preview = Vec::new();
        if preview_rows > 0 {
            let reader = builder.with_batch_size(preview_rows.min(8192)).build()?;
            for batch in reader {
                let batch = batch?;
                append_rows(&batch, preview_rows - preview.len(), &mut preview)?;
                if preview.len() >= preview_rows {
                    break;
                }
            }
        }

        Ok(ParquetSummary {
            path: path.to_path_buf(),
            num_rows,
            columns,
            preview,
        })
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn compression_from_name(name: &str) -> Result<Compression> {
    match name.to_lowercase().as_str() {
        "snappy" => Ok(Compression::SNAPPY),
        "zstd" => Ok(Compression::ZSTD(ZstdLevel::default())),
        "gzip" => Ok(Compression::GZIP(GzipLevel::default())),
        "none" => Ok(Compression::UNCOMPRESSED),
        other => Err(PipelineError::Config(format!(
            "unsupported compression '{}'",
            other
        ))),
    }
}

fn build_record_batch(schema: SchemaRef, rows: &[DatasetRow]) -> Result<RecordBatch> {
    let senders: StringArray = rows.iter().map(|row| row.sender.as_deref()).collect();
    let texts: StringArray = rows.iter().map(|row| Some(row.text.as_str())).collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(senders) as ArrayRef, Arc::new(texts) as ArrayRef],
    )?;
    Ok(batch)
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|column| column.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| PipelineError::Validation(format!("missing Utf8 column '{}'", name)))
}

fn append_rows(batch: &RecordBatch, limit: usize, out: &mut Vec<DatasetRow>) -> Result<()> {
    let senders = string_column(batch, "sender")?;
    let texts = string_column(batch, "text")?;

    for idx in 0..batch.num_rows().min(limit) {
        let sender = if senders.is_null(idx) {
            None
        } else {
            Some(senders.value(idx).to_string())
        };
        out.push(DatasetRow {
            sender,
            text: texts.value(idx).to_string(),
        });
    }

    Ok(())
}
