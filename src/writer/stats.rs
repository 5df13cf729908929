use std::fmt;
use std::path::PathBuf;

use super::OutputFormat;

/// Statistics from a completed write operation
#[derive(Debug, Clone)]
pub struct WriterStats {
    /// Final location of the table
    pub path: PathBuf,
    /// Format the table was written in
    pub format: OutputFormat,
    /// Number of data rows written
    pub rows_written: usize,
    /// Total file size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows to {} ({}, {} bytes)",
            self.rows_written,
            self.path.display(),
            self.format,
            self.file_size_bytes
        )
    }
}
