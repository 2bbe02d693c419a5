// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_COMPRESSION: [&str; 4] = ["snappy", "zstd", "gzip", "none"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub maildir_path: PathBuf,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    /// 0 disables the cap.
    #[serde(default)]
    pub max_file_size_mb: usize,
    #[serde(default)]
    pub follow_links: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub compression: String,
    pub batch_size: usize,
    pub write_manifest: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub limit: Option<usize>,
    pub show_progress: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("MAIL_ANONYMIZE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults reproduce a plain run over `./maildir`: every regular file is
    /// read, with no skip patterns and no size cap.
    pub fn default_config() -> Self {
        Self {
            input: InputConfig {
                maildir_path: PathBuf::from("./maildir"),
                skip_patterns: Vec::new(),
                max_file_size_mb: 0,
                follow_links: false,
            },
            output: OutputConfig {
                path: PathBuf::from("enron_anonymized.parquet"),
                compression: "snappy".to_string(),
                batch_size: 8192,
                write_manifest: false,
            },
            pipeline: PipelineConfig {
                limit: None,
                show_progress: true,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.batch_size == 0 {
            return Err(PipelineError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(PipelineError::Config(
                "output path must not be empty".to_string(),
            ));
        }

        let compression = self.output.compression.to_lowercase();
        if !SUPPORTED_COMPRESSION.contains(&compression.as_str()) {
            return Err(PipelineError::Config(format!(
                "unsupported compression '{}' (expected one of: {})",
                self.output.compression,
                SUPPORTED_COMPRESSION.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.input.maildir_path, PathBuf::from("./maildir"));
        assert!(config.input.skip_patterns.is_empty());
        assert_eq!(config.input.max_file_size_mb, 0);
        assert_eq!(
            config.output.path,
            PathBuf::from("enron_anonymized.parquet")
        );
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let mut config = Config::default_config();
        config.output.batch_size = 0;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_compression() {
        let mut config = Config::default_config();
        config.output.compression = "lz77".to_string();
        assert!(config.validate().is_err());

        config.output.compression = "ZSTD".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[input]
maildir_path = "/data/maildir"
max_file_size_mb = 5

[output]
path = "out/emails.parquet"
compression = "zstd"
batch_size = 100
write_manifest = true

[pipeline]
limit = 42
show_progress = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.input.maildir_path, PathBuf::from("/data/maildir"));
        assert!(config.input.skip_patterns.is_empty());
        assert!(!config.input.follow_links);
        assert_eq!(config.output.compression, "zstd");
        assert_eq!(config.pipeline.limit, Some(42));
        assert!(!config.pipeline.show_progress);
    }
}
