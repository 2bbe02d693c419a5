// file: src/pipeline/progress.rs
// description: per-stage progress bars and run statistics for the anonymization pipeline
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub files_scanned: usize,
    /// Files left out by skip patterns, the size cap or walk errors.
    #[serde(default)]
    pub files_skipped: usize,
    pub emails_parsed: usize,
    pub parse_failures: usize,
    pub anonymization_failures: usize,
    pub rows_written: usize,
    pub rows_dropped_empty: usize,
    pub total_bytes_processed: u64,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.files_scanned as f64 / self.duration_secs
    }

    pub fn bytes_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.total_bytes_processed as f64 / self.duration_secs
    }

    /// Percentage of scanned files that were read and parsed.
    pub fn parse_success_rate(&self) -> f64 {
        let total = self.emails_parsed + self.parse_failures;
        if total == 0 {
            return 0.0;
        }
        (self.emails_parsed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    stage_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_scanned: Cell<usize>,
    files_skipped: Cell<usize>,
    emails_parsed: Cell<usize>,
    parse_failures: Cell<usize>,
    anonymization_failures: Cell<usize>,
    bytes_processed: Cell<u64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(visible: bool) -> Self {
        Self::with_color(visible, true)
    }

    pub fn with_color(visible: bool, colored: bool) -> Self {
        let multi_progress = if visible {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let stage_bar = create_stage_bar(&multi_progress, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            stage_bar,
            detail_bar,
            files_scanned: Cell::new(0),
            files_skipped: Cell::new(0),
            emails_parsed: Cell::new(0),
            parse_failures: Cell::new(0),
            anonymization_failures: Cell::new(0),
            bytes_processed: Cell::new(0),
            start_time: Instant::now(),
        }
    }

    /// Resets the bar for the next stage.
    pub fn begin_stage(&self, label: &str, total: usize) {
        self.stage_bar.reset();
        self.stage_bar.set_length(total as u64);
        self.stage_bar.set_position(0);
        self.stage_bar.set_prefix(label.to_string());
        self.update_detail_bar();
    }

    pub fn advance(&self) {
        self.advance_by(1);
    }

    pub fn advance_by(&self, steps: usize) {
        self.stage_bar.inc(steps as u64);
    }

    pub fn stage_position(&self) -> u64 {
        self.stage_bar.position()
    }

    pub fn set_scan_counts(&self, scanned: usize, skipped: usize) {
        self.files_scanned.set(scanned);
        self.files_skipped.set(skipped);
    }

    pub fn inc_emails_parsed(&self) {
        bump(&self.emails_parsed);
        self.update_detail_bar();
    }

    pub fn inc_parse_failures(&self) {
        bump(&self.parse_failures);
        self.update_detail_bar();
    }

    pub fn inc_anonymization_failures(&self) {
        bump(&self.anonymization_failures);
        self.update_detail_bar();
    }

    pub fn add_bytes_processed(&self, bytes: u64) {
        self.bytes_processed.set(self.bytes_processed.get() + bytes);
    }

    pub fn finish(&self) {
        self.stage_bar.finish_with_message("Processing complete");
        self.detail_bar.finish_and_clear();
    }

    /// Counters collected so far. Row counts are filled in by the caller
    /// once the dataset has been written.
    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            files_scanned: self.files_scanned.get(),
            files_skipped: self.files_skipped.get(),
            emails_parsed: self.emails_parsed.get(),
            parse_failures: self.parse_failures.get(),
            anonymization_failures: self.anonymization_failures.get(),
            rows_written: 0,
            rows_dropped_empty: 0,
            total_bytes_processed: self.bytes_processed.get(),
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }

    fn update_detail_bar(&self) {
        let message = format!(
            "Parsed: {} | Unreadable: {} | Unredacted: {}",
            self.emails_parsed.get(),
            self.parse_failures.get(),
            self.anonymization_failures.get()
        );

        self.detail_bar.set_message(message);
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_stage_bar(multi_progress: &MultiProgress, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} {prefix:>10.bold} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} {prefix:>10} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}
