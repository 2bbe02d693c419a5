// file: src/pipeline/orchestrator.rs
// description: coordinates scanning, parsing, cleaning, anonymization and parquet export
// reference: orchestrates the synchronous batch workflow

use crate::cleaner::BoilerplateCleaner;
use crate::config::Config;
use crate::corpus::{FileScanner, ScannedFile};
use crate::error::Result;
use crate::exporter::{ParquetExporter, RunManifest};
use crate::models::EmailTable;
use crate::parser::EmailParser;
use crate::pii::PiiRedactor;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use chrono::Utc;
use tracing::{debug, info, warn};

pub struct PipelineOrchestrator {
    config: Config,
    scanner: FileScanner,
    parser: EmailParser,
    cleaner: BoilerplateCleaner,
    redactor: PiiRedactor,
    exporter: ParquetExporter,
    colored: bool,
}

impl PipelineOrchestrator {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let scanner = FileScanner::new(config.input.clone());
        let exporter = ParquetExporter::new(config.output.clone())?;

        Ok(Self {
            config,
            scanner,
            parser: EmailParser::new(),
            cleaner: BoilerplateCleaner::new(),
            redactor: PiiRedactor::new(),
            exporter,
            colored: true,
        })
    }

    /// Replaces the default redactor, e.g. to use a custom analyzer.
    pub fn with_redactor(mut self, redactor: PiiRedactor) -> Self {
        self.redactor = redactor;
        self
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<PipelineStats> {
        info!("Starting email anonymization pipeline");
        let started_at = Utc::now();
        let tracker = ProgressTracker::with_color(self.config.pipeline.show_progress, self.colored);

        info!("Step 1: Loading and parsing raw email files...");
        let files = self.scan_files(&tracker)?;

        if files.is_empty() {
            warn!(
                "No files found under {}",
                self.config.input.maildir_path.display()
            );
        }

        let mut table = self.parse_files(&files, &tracker);
        info!("Successfully loaded and parsed {} emails.", table.len());

        info!("Step 2: Cleaning email body text...");
        tracker.begin_stage("Cleaning", table.len());
        table.derive_cleaned(|body| {
            let cleaned = self.cleaner.clean(body);
            tracker.advance();
            cleaned
        });

        info!("Step 3: Anonymizing PII (this may take a while)...");
        tracker.begin_stage("Redacting", table.len());
        table.derive_anonymized(|text| {
            let (anonymized, redacted) = self.redactor.redact_or_original(text);
            if !redacted {
                tracker.inc_anonymization_failures();
            }
            tracker.advance();
            anonymized
        });

        info!("Step 4: Saving the final, processed dataset...");
        let emails_parsed = table.len();
        let dataset = table.into_dataset();
        let rows_dropped_empty = emails_parsed - dataset.len();
        debug!("Dropped {} rows with empty text", rows_dropped_empty);

        tracker.begin_stage("Writing", dataset.len());
        let summary = self
            .exporter
            .write(&dataset, |rows| tracker.advance_by(rows))?;
        tracker.finish();

        let mut stats = tracker.get_stats();
        stats.rows_written = summary.rows_written;
        stats.rows_dropped_empty = rows_dropped_empty;

        if self.config.output.write_manifest {
            RunManifest::new(
                started_at,
                &self.config.input.maildir_path,
                &summary.path,
                &self.config.output.compression,
                stats.clone(),
            )
            .write(&summary.path)?;
        }

        self.log_final_stats(&stats);
        info!(
            "Anonymized dataset with {} emails saved to: {}",
            stats.rows_written,
            summary.path.display()
        );

        Ok(stats)
    }

    fn scan_files(&self, tracker: &ProgressTracker) -> Result<Vec<ScannedFile>> {
        let report = self
            .scanner
            .scan_directory(&self.config.input.maildir_path)?;
        let mut files = report.files;

        if let Some(limit) = self.config.pipeline.limit
            && files.len() > limit
        {
            info!("Limiting run to the first {} of {} files", limit, files.len());
            files.truncate(limit);
        }

        tracker.set_scan_counts(files.len(), report.skipped);
        Ok(files)
    }

    fn parse_files(&self, files: &[ScannedFile], tracker: &ProgressTracker) -> EmailTable {
        tracker.begin_stage("Parsing", files.len());
        let mut table = EmailTable::new();

        for file in files {
            match self.parser.parse_file(file) {
                Ok(email) => {
                    tracker.inc_emails_parsed();
                    tracker.add_bytes_processed(file.size);
                    table.push(email);
                }
                Err(e) => {
                    tracker.inc_parse_failures();
                    debug!("Skipping {}: {}", file.relative_path, e);
                }
            }
            tracker.advance();
        }

        table
    }

    fn log_final_stats(&self, stats: &PipelineStats) {
        info!("=== Pipeline Execution Summary ===");
        info!("Duration: {:.2} seconds", stats.duration_secs);
        info!("Files scanned: {}", stats.files_scanned);
        if stats.files_skipped > 0 {
            warn!(
                "Files skipped (skip patterns, size cap or walk errors): {}",
                stats.files_skipped
            );
        } else {
            info!("Files skipped: 0");
        }
        info!("Emails parsed: {}", stats.emails_parsed);
        info!("Unreadable files: {}", stats.parse_failures);
        info!("Parse success rate: {:.2}%", stats.parse_success_rate());
        if stats.anonymization_failures > 0 {
            warn!(
                "Anonymization failures: {} (text kept unredacted)",
                stats.anonymization_failures
            );
        } else {
            info!("Anonymization failures: 0");
        }
        info!("Rows dropped (empty text): {}", stats.rows_dropped_empty);
        info!("Rows written: {}", stats.rows_written);
        info!(
            "Processing speed: {:.2} files/sec",
            stats.files_per_second()
        );
        info!(
            "Throughput: {:.2} MB/sec",
            stats.bytes_per_second() / 1_048_576.0
        );
        info!("=================================");
    }
}
