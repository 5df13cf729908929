use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::{PipelineConfig, PipelineStats};
use crate::writer::{OutputFormat, WriterStats};

use super::MetadataError;

/// Extension appended to the output stem for the sidecar
pub const SIDECAR_EXTENSION: &str = "meta.json";

/// Where the inputs of a run came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInputs {
    /// Electrical table origin
    pub electrical: String,
    /// Optical table origin
    pub optical: String,
}

/// What a run wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSummary {
    /// Output path
    pub path: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Rows written
    pub rows: usize,
    /// File size in bytes
    pub bytes: u64,
}

impl From<&WriterStats> for OutputSummary {
    fn from(stats: &WriterStats) -> Self {
        Self {
            path: stats.path.clone(),
            format: stats.format,
            rows: stats.rows_written,
            bytes: stats.file_size_bytes,
        }
    }
}

/// Provenance record of a single merge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Unique identifier of this run
    pub run_id: Uuid,

    /// When the run finished
    pub created_at: DateTime<Utc>,

    /// Software name
    pub software: String,

    /// Software version
    pub version: String,

    /// Input origins
    pub inputs: RunInputs,

    /// Output written, if any
    pub output: Option<OutputSummary>,

    /// Configuration the engine ran with
    pub config: PipelineConfig,

    /// Run counters and smoothing outcomes
    pub stats: PipelineStats,
}

impl RunMetadata {
    /// New record stamped with a fresh run id and the current time
    pub fn new(inputs: RunInputs, config: PipelineConfig, stats: PipelineStats) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            software: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            inputs,
            output: None,
            config,
            stats,
        }
    }

    /// Attach the writer result
    pub fn with_output(mut self, written: &WriterStats) -> Self {
        self.output = Some(written.into());
        self
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the sidecar for `output`, returning its path
    pub fn write_sidecar(&self, output: &Path) -> Result<PathBuf, MetadataError> {
        let path = sidecar_path(output);
        fs::write(&path, self.to_json()?)?;
        Ok(path)
    }
}

/// Sidecar location for an output table: same directory, same stem
pub fn sidecar_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "combined_data".to_string());
    output.with_file_name(format!("{stem}.{SIDECAR_EXTENSION}"))
}
