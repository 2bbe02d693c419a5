// file: tests/pipeline_test.rs
// description: end-to-end runs over a small on-disk maildir

use mail_anonymize::{
    AnalyzerEngine, AnonymizerEngine, Config, DatasetRow, ParquetExporter, PiiRedactor,
    PipelineOrchestrator, RunManifest,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_mail(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn build_maildir(root: &Path) {
    write_mail(
        root,
        "skilling-j/inbox/1.",
        b"Message-ID: <1.JavaMail.evans@thyme>\n\
From: jeff.skilling@enron.com\n\
To: kenneth.lay@enron.com\n\
Subject: call\n\
\n\
Please call me at (713) 853-5620 or write to sherron.watkins@enron.com today.\n\
\n\
-----Original Message-----\n\
From: Lay, Kenneth\n\
Sent: Monday\n\
old thread that must disappear\n",
    );

    write_mail(
        root,
        "skilling-j/inbox/2.",
        b"From: tim.belden@enron.com\n\
Subject: re: west power\n\
\n\
> did you see the numbers?\n\
> they look high\n",
    );

    write_mail(
        root,
        "skilling-j/sent/1.",
        b"From: john.arnold@enron.com\n\
MIME-Version: 1.0\n\
Content-Type: multipart/alternative; boundary=\"B\"\n\
\n\
--B\n\
Content-Type: text/html\n\
\n\
<p>ignored html</p>\n\
--B\n\
Content-Type: text/plain\n\
\n\
Gas storage looks tight.\n\
Best regards,\n\
John\n\
--B--\n",
    );

    let mut latin1 = b"To: desk@enron.com\nSubject: lunch\n\nThe caf".to_vec();
    latin1.push(0xE9);
    latin1.extend_from_slice(b" on the 3rd floor is open.\n");
    write_mail(root, "watkins-s/inbox/7.", &latin1);

    write_mail(root, "watkins-s/inbox/empty.", b"");
    write_mail(root, "watkins-s/.DS_Store", b"binary junk");
}

fn config_for(input: &Path, output: &Path) -> Config {
    let mut config = Config::default_config();
    config.input.maildir_path = input.to_path_buf();
    config.input.skip_patterns = vec![".DS_Store".to_string()];
    config.output.path = output.to_path_buf();
    config.output.batch_size = 2;
    config.output.write_manifest = true;
    config.pipeline.show_progress = false;
    config
}

#[test]
fn test_end_to_end_dataset() {
    let temp = TempDir::new().unwrap();
    let maildir = temp.path().join("maildir");
    build_maildir(&maildir);
    let output = temp.path().join("out").join("enron_anonymized.parquet");

    let stats = PipelineOrchestrator::new(config_for(&maildir, &output))
        .unwrap()
        .with_color(false)
        .run()
        .unwrap();

    assert_eq!(stats.files_scanned, 5);
    assert_eq!(stats.files_skipped, 1);
    // the empty file parses to an empty body and is dropped at export
    assert_eq!(stats.emails_parsed, 5);
    assert_eq!(stats.parse_failures, 0);
    assert_eq!(stats.rows_dropped_empty, 2);
    assert_eq!(stats.anonymization_failures, 0);
    assert_eq!(stats.rows_written, stats.emails_parsed - stats.rows_dropped_empty);
    assert_eq!(stats.rows_written, 3);

    let summary = ParquetExporter::read_summary(&output, 10).unwrap();
    assert_eq!(summary.num_rows, stats.rows_written);
    assert_eq!(summary.columns, vec!["sender".to_string(), "text".to_string()]);
    assert_eq!(
        summary.preview,
        vec![
            DatasetRow {
                sender: Some("jeff.skilling@enron.com".to_string()),
                text: "Please call me at <REDACTED> or write to <REDACTED> today.".to_string(),
            },
            DatasetRow {
                sender: Some("john.arnold@enron.com".to_string()),
                text: "Gas storage looks tight.".to_string(),
            },
            DatasetRow {
                sender: None,
                text: "The café on the 3rd floor is open.".to_string(),
            },
        ]
    );

    let manifest = RunManifest::load(&RunManifest::path_for(&output)).unwrap();
    assert_eq!(manifest.stats.rows_written, 3);
    assert_eq!(manifest.stats.files_skipped, 1);
    assert_eq!(manifest.redaction_token, "<REDACTED>");
}

#[test]
fn test_headerless_file_becomes_body_only_row() {
    let temp = TempDir::new().unwrap();
    let maildir = temp.path().join("maildir");
    write_mail(&maildir, "notes/1.", b"just some notes\nwith no headers\n");
    let output = temp.path().join("notes.parquet");

    let stats = PipelineOrchestrator::new(config_for(&maildir, &output))
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(stats.emails_parsed, 1);
    assert_eq!(stats.rows_written, 1);

    let summary = ParquetExporter::read_summary(&output, 5).unwrap();
    assert_eq!(summary.preview[0].sender, None);
    assert!(summary.preview[0].text.contains("just some notes"));
}

#[test]
fn test_failed_redaction_writes_cleaned_text_and_counts_it() {
    let temp = TempDir::new().unwrap();
    let maildir = temp.path().join("maildir");
    build_maildir(&maildir);
    let output = temp.path().join("fallback.parquet");

    // every non-trivial text exceeds the analyzer limit
    let redactor = PiiRedactor::with_engines(
        AnalyzerEngine::new().with_max_chars(20),
        AnonymizerEngine::new(),
    );
    let stats = PipelineOrchestrator::new(config_for(&maildir, &output))
        .unwrap()
        .with_color(false)
        .with_redactor(redactor)
        .run()
        .unwrap();

    assert_eq!(stats.anonymization_failures, 3);
    assert_eq!(stats.rows_written, 3);

    let summary = ParquetExporter::read_summary(&output, 10).unwrap();
    assert_eq!(
        summary.preview[0].text,
        "Please call me at (713) 853-5620 or write to sherron.watkins@enron.com today."
    );

    let manifest = RunManifest::load(&RunManifest::path_for(&output)).unwrap();
    assert_eq!(manifest.stats.anonymization_failures, 3);
}

#[test]
fn test_empty_maildir_still_writes_dataset() {
    let temp = TempDir::new().unwrap();
    let maildir = temp.path().join("maildir");
    fs::create_dir_all(&maildir).unwrap();
    let output = temp.path().join("empty.parquet");

    let stats = PipelineOrchestrator::new(config_for(&maildir, &output))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(stats.files_scanned, 0);
    assert_eq!(stats.rows_written, 0);

    let summary = ParquetExporter::read_summary(&output, 5).unwrap();
    assert_eq!(summary.num_rows, 0);
}

#[test]
fn test_rerun_overwrites_output() {
    let temp = TempDir::new().unwrap();
    let maildir = temp.path().join("maildir");
    build_maildir(&maildir);
    let output = temp.path().join("data.parquet");

    let mut config = config_for(&maildir, &output);
    config.pipeline.limit = Some(1);
    PipelineOrchestrator::new(config.clone()).unwrap().run().unwrap();
    assert_eq!(ParquetExporter::read_summary(&output, 0).unwrap().num_rows, 1);

    config.pipeline.limit = None;
    config.output.compression = "zstd".to_string();
    let stats = PipelineOrchestrator::new(config).unwrap().run().unwrap();
    assert_eq!(
        ParquetExporter::read_summary(&output, 0).unwrap().num_rows,
        stats.rows_written
    );
}
