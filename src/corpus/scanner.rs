// file: src/corpus/scanner.rs
// description: Directory walking and email file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::InputConfig;
use crate::error::Result;
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub struct FileScanner {
    config: InputConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

/// Files kept by a scan plus the count of regular files left out.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub files: Vec<ScannedFile>,
    pub skipped: usize,
}

impl FileScanner {
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Lists every regular file under `root`, sorted by relative path.
    /// Maildir messages carry no extension, so none is required.
    pub fn scan_directory(&self, root: &Path) -> Result<ScanReport> {
        Validator::validate_directory(root)?;

        info!("Scanning directory: {}", root.display());
        let mut report = ScanReport::default();
        let max_size = (self.config.max_file_size_mb as u64) * 1024 * 1024;

        for entry in WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    report.skipped += 1;
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");

            if self.should_skip(&relative_path) {
                debug!("Skipping file: {}", relative_path);
                report.skipped += 1;
                continue;
            }

            let Ok(metadata) = entry.metadata() else {
                warn!("Skipping file without metadata: {}", relative_path);
                report.skipped += 1;
                continue;
            };

            let size = metadata.len();
            if max_size > 0 && size > max_size {
                warn!(
                    "Skipping large file ({} MB): {}",
                    size / 1024 / 1024,
                    relative_path
                );
                report.skipped += 1;
                continue;
            }

            report.files.push(ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size,
            });
        }

        report
            .files
            .sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        info!(
            "Found {} candidate email files ({} skipped)",
            report.files.len(),
            report.skipped
        );
        Ok(report)
    }

    /// Patterns match the path relative to the scan root, so the location
    /// of the maildir itself never causes a skip.
    fn should_skip(&self, relative_path: &str) -> bool {
        for pattern in &self.config.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if relative_path.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if relative_path.contains(pattern.as_str()) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn input_config(skip_patterns: Vec<String>, max_file_size_mb: usize) -> InputConfig {
        InputConfig {
            maildir_path: PathBuf::from("./maildir"),
            skip_patterns,
            max_file_size_mb,
            follow_links: false,
        }
    }

    #[test]
    fn test_scan_nested_maildir() {
        let temp = TempDir::new().unwrap();
        let inbox = temp.path().join("allen-p").join("inbox");
        let sent = temp.path().join("allen-p").join("sent");
        fs::create_dir_all(&inbox).unwrap();
        fs::create_dir_all(&sent).unwrap();
        fs::write(inbox.join("2."), "From: a\n\nb").unwrap();
        fs::write(inbox.join("1."), "From: a\n\nb").unwrap();
        fs::write(sent.join("1."), "From: a\n\nb").unwrap();

        let scanner = FileScanner::new(input_config(vec![], 10));
        let report = scanner.scan_directory(temp.path()).unwrap();

        let paths: Vec<&str> = report
            .files
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(
            paths,
            vec!["allen-p/inbox/1.", "allen-p/inbox/2.", "allen-p/sent/1."]
        );
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_skip_patterns() {
        let scanner = FileScanner::new(input_config(
            vec!["*.zip".to_string(), ".DS_Store".to_string()],
            10,
        ));

        assert!(scanner.should_skip("archive.zip"));
        assert!(scanner.should_skip("allen-p/.DS_Store"));
        assert!(!scanner.should_skip("allen-p/inbox/1."));
    }

    #[test]
    fn test_skipped_files_are_counted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("1."), "From: a\n\nb").unwrap();
        fs::write(temp.path().join(".DS_Store"), "junk").unwrap();
        fs::write(temp.path().join("notes.zip"), "junk").unwrap();

        let scanner = FileScanner::new(input_config(
            vec!["*.zip".to_string(), ".DS_Store".to_string()],
            0,
        ));
        let report = scanner.scan_directory(temp.path()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.skipped, 2);
    }

    #[test]
    fn test_skip_patterns_ignore_the_root_location() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("backup").join("maildir");
        fs::create_dir_all(root.join("allen-p")).unwrap();
        fs::write(root.join("allen-p").join("1."), "From: a\n\nb").unwrap();
        fs::write(root.join("allen-p").join("backup.1"), "From: a\n\nb").unwrap();

        let scanner = FileScanner::new(input_config(vec!["backup".to_string()], 0));
        let report = scanner.scan_directory(&root).unwrap();
        let paths: Vec<&str> = report
            .files
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["allen-p/1."]);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_size_limit() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("small"), "x").unwrap();
        fs::write(temp.path().join("big"), vec![b'x'; 1024 * 1024 + 1]).unwrap();

        let scanner = FileScanner::new(input_config(vec![], 1));
        let report = scanner.scan_directory(temp.path()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].relative_path, "small");
        assert_eq!(report.skipped, 1);

        let unlimited = FileScanner::new(input_config(vec![], 0));
        let report = unlimited.scan_directory(temp.path()).unwrap();
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let scanner = FileScanner::new(input_config(vec![], 10));
        assert!(scanner.scan_directory(&temp.path().join("nope")).is_err());
    }
}
