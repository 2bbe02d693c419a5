// file: src/exporter/manifest.rs
// description: json run manifest written next to the parquet dataset
// reference: https://docs.rs/serde_json

use crate::error::{PipelineError, Result};
use crate::pipeline::PipelineStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub started_at: String,
    pub finished_at: String,
    pub input_dir: String,
    pub output_path: String,
    pub compression: String,
    pub redaction_token: String,
    pub stats: PipelineStats,
}

impl RunManifest {
    pub fn new(
        started_at: DateTime<Utc>,
        input_dir: &Path,
        output_path: &Path,
        compression: &str,
        stats: PipelineStats,
    ) -> Self {
        Self {
            started_at: started_at.to_rfc3339(),
            finished_at: Utc::now().to_rfc3339(),
            input_dir: input_dir.display().to_string(),
            output_path: output_path.display().to_string(),
            compression: compression.to_lowercase(),
            redaction_token: crate::pii::REDACTION_TOKEN.to_string(),
            stats,
        }
    }

    /// `<dataset>.manifest.json`
    pub fn path_for(output_path: &Path) -> PathBuf {
        let mut path = output_path.as_os_str().to_owned();
        path.push(".manifest.json");
        PathBuf::from(path)
    }

    pub fn write(&self, output_path: &Path) -> Result<PathBuf> {
        let path = Self::path_for(output_path);
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&path, json).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!("Run manifest written to {}", path.display());
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }
}
