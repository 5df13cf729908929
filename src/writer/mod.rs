//! # Combined Table Writer
//!
//! Writes a [`CombinedSeries`] with the fixed eleven-column layout from
//! [`crate::schema::columns::COMBINED`].
//!
//! Output is staged in a temporary file next to the destination and renamed
//! into place once complete, so a failed run never leaves a truncated table
//! behind. CSV is always available; Parquet needs the `parquet` feature.

#[cfg(feature = "parquet")]
mod columnar;
mod error;
mod stats;
mod table;

#[cfg(test)]
mod tests;

use std::fmt;
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::align::CombinedSeries;

#[cfg(feature = "parquet")]
pub use columnar::{combined_schema, write_parquet};
pub use error::WriterError;
pub use stats::WriterStats;
pub use table::write_csv;

/// On-disk format of the combined table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated text
    #[default]
    Csv,
    /// Apache Parquet
    Parquet,
}

impl OutputFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }

    /// Format implied by the extension of `path`, if recognised
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = WriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" | "pq" => Ok(OutputFormat::Parquet),
            other => Err(WriterError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Write `series` to `path` in `format`, replacing any existing file.
pub fn write_combined(
    series: &CombinedSeries,
    path: &Path,
    format: OutputFormat,
) -> Result<WriterStats, WriterError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;

    let rows_written = match format {
        OutputFormat::Csv => write_csv(series, BufWriter::new(staged.as_file_mut()))?,
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => write_parquet(series, staged.as_file_mut())?,
        #[cfg(not(feature = "parquet"))]
        OutputFormat::Parquet => {
            return Err(WriterError::UnsupportedFormat(
                "parquet (built without the `parquet` feature)".to_string(),
            ))
        }
    };
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| WriterError::IoError(e.error))?;

    let stats = WriterStats {
        path: path.to_path_buf(),
        format,
        rows_written,
        file_size_bytes: fs::metadata(path)?.len(),
    };
    info!("{}", stats);
    Ok(stats)
}
